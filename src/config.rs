//! Process configuration loaded from the environment.

use std::env;
use std::time::Duration;

/// Seconds between poll cycles.
pub const RETRY_PERIOD_SECS: u64 = 600;

/// Review status endpoint of the homework API.
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Everything the bot needs to run, resolved once at startup.
///
/// Secrets load as empty strings when their variables are unset so that
/// [`Config::is_complete`] can report *all* missing names at once instead
/// of failing on the first.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the review API (`PRACTICUM_TOKEN`).
    pub practicum_token: String,
    /// Bot token for the Telegram API (`TELEGRAM_TOKEN`).
    pub telegram_token: String,
    /// Destination chat (`TELEGRAM_CHAT_ID`).
    pub telegram_chat_id: String,
    /// Delay between poll cycles.
    pub poll_interval: Duration,
    /// Review status endpoint URL.
    pub endpoint: String,
}

impl Config {
    /// Load configuration from the environment (reading `.env` first).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            practicum_token: env::var("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: env::var("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),
            poll_interval: Duration::from_secs(RETRY_PERIOD_SECS),
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// True iff every required secret is present.
    pub fn is_complete(&self) -> bool {
        self.missing_vars().is_empty()
    }

    /// Names of the required variables that are unset or empty.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.practicum_token.is_empty() {
            missing.push("PRACTICUM_TOKEN");
        }
        if self.telegram_token.is_empty() {
            missing.push("TELEGRAM_TOKEN");
        }
        if self.telegram_chat_id.is_empty() {
            missing.push("TELEGRAM_CHAT_ID");
        }
        missing
    }
}
