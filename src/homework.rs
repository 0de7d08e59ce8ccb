use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::error::{json_type_name, Error, Result};

/// Review outcome reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn from_status(status: &Value) -> Option<Self> {
        Self::deserialize(status).ok()
    }

    pub fn sentence(self) -> &'static str {
        match self {
            Verdict::Approved => "Review completed: the reviewer liked everything. Hooray!",
            Verdict::Reviewing => "The reviewer has taken the work for review.",
            Verdict::Rejected => "Review completed: the reviewer has comments.",
        }
    }
}

/// Checks the response shape and hands back the `homeworks` list.
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let Some(object) = response.as_object() else {
        let kind = json_type_name(response);
        error!("Unexpected response type: {}", kind);
        return Err(Error::UnexpectedResponseType(kind));
    };

    let Some(homeworks) = object.get("homeworks") else {
        error!("API response has no `homeworks` key");
        return Err(Error::InvalidResponse);
    };

    match homeworks {
        Value::Array(items) => Ok(items.as_slice()),
        other => {
            let kind = json_type_name(other);
            error!("Unexpected `homeworks` type: {}", kind);
            Err(Error::UnexpectedDataType(kind))
        }
    }
}

/// Builds the chat message for one submission record.
pub fn parse_status(homework: &Value) -> Result<String> {
    let status = homework.get("status");
    let Some(verdict) = status.and_then(Verdict::from_status) else {
        let shown = status.map_or_else(|| "<missing>".to_string(), Value::to_string);
        error!("Unexpected homework status in API response: {}", shown);
        return Err(Error::UnknownStatus(shown));
    };

    let name = match homework.get("homework_name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => {
            error!("API response is missing homework_name");
            return Err(Error::MissingHomeworkName);
        }
    };

    Ok(format!(
        "Changed review status of \"{}\". {}",
        name,
        verdict.sentence()
    ))
}
