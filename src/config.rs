use std::env;
use std::fmt;
use std::time::Duration;

use teloxide::types::{ChatId, Recipient};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Pause between two polls, whatever the outcome of the previous one.
pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variables are not set: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat: Recipient,
    pub endpoint: String,
    pub retry_period: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as
    /// unset, and every missing key is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let practicum_token = required(PRACTICUM_TOKEN);
        let telegram_token = required(TELEGRAM_TOKEN);
        let chat_id = required(TELEGRAM_CHAT_ID);

        let (practicum_token, telegram_token, chat_id) =
            match (practicum_token, telegram_token, chat_id) {
                (Some(p), Some(t), Some(c)) => (p, t, c),
                (p, t, c) => {
                    let missing = [
                        (PRACTICUM_TOKEN, p.is_none()),
                        (TELEGRAM_TOKEN, t.is_none()),
                        (TELEGRAM_CHAT_ID, c.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                    return Err(ConfigError::Missing(missing));
                }
            };

        Ok(Self {
            practicum_token,
            telegram_token,
            chat: parse_recipient(&chat_id),
            endpoint: lookup(PRACTICUM_ENDPOINT)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_period: RETRY_PERIOD,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat", &self.chat)
            .field("endpoint", &self.endpoint)
            .field("retry_period", &self.retry_period)
            .finish()
    }
}

/// Numeric ids address a chat directly, anything else is taken as a channel
/// username (`@channel`).
fn parse_recipient(raw: &str) -> Recipient {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(raw.to_string()),
    }
}
