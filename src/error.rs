/// Everything that can abort a single poll cycle.
///
/// The `Display` text ends up in the bug report sent to the chat, so keep it
/// readable for a human rather than for a log parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("status endpoint is unreachable: {0}")]
    EndpointUnreachable(#[source] reqwest::Error),

    #[error("incorrect server response: endpoint {endpoint} returned {status}")]
    IncorrectServerResponse {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode server response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("unexpected response type: expected an object, got {0}")]
    UnexpectedResponseType(&'static str),

    #[error("API response does not match the documentation: no `homeworks` key")]
    InvalidResponse,

    #[error("unexpected data type: `homeworks` should be an array, got {0}")]
    UnexpectedDataType(&'static str),

    #[error("unexpected homework status in API response: {0}")]
    UnknownStatus(String),

    #[error("missing expected key in API response: homework_name")]
    MissingHomeworkName,

    #[error("failed to send message: {0}")]
    SendMessage(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Human name of a JSON value's type, used in shape errors.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
