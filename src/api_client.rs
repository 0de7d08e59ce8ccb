use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Source of homework statuses, polled once per cycle.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Statuses changed since `from_date` (Unix seconds), as raw JSON.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value>;
}

pub struct ApiClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            endpoint,
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!("Status endpoint is unreachable: {}", e);
                Error::EndpointUnreachable(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Endpoint {} returned {}", self.endpoint, status);
            return Err(Error::IncorrectServerResponse {
                endpoint: self.endpoint.clone(),
                status,
            });
        }

        debug!("Correct server response: {}", status);
        response.json::<Value>().await.map_err(Error::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(
            format!("{}{}", server.uri(), STATUSES_PATH),
            "secret-token".to_string(),
        )
    }

    #[tokio::test]
    async fn sends_token_and_cursor_and_returns_body() {
        let server = MockServer::start().await;
        let body = json!({
            "homeworks": [{"status": "approved", "homework_name": "hw_bot.zip"}],
            "current_date": 1_700_000_500
        });
        Mock::given(method("GET"))
            .and(path(STATUSES_PATH))
            .and(header("Authorization", "OAuth secret-token"))
            .and(query_param("from_date", "1700000000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let value = client_for(&server)
            .homework_statuses(1_700_000_000)
            .await
            .unwrap();

        assert_eq!(value, body);
    }

    #[tokio::test]
    async fn non_200_is_an_incorrect_server_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).homework_statuses(0).await.unwrap_err();

        match err {
            Error::IncorrectServerResponse { status, .. } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn created_is_not_ok_either() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"homeworks": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).homework_statuses(0).await.unwrap_err();
        assert!(matches!(err, Error::IncorrectServerResponse { .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).homework_statuses(0).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_a_typed_error() {
        // Nothing listens on port 1.
        let client = ApiClient::new("http://127.0.0.1:1/".to_string(), "t".to_string());

        let err = client.homework_statuses(0).await.unwrap_err();

        assert!(matches!(err, Error::EndpointUnreachable(_)));
        let text = err.to_string();
        assert!(text.starts_with("status endpoint is unreachable"), "{text}");
        assert_eq!(text.matches("127.0.0.1:1").count(), 1, "{text}");
    }
}
