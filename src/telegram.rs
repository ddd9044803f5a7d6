//! Best-effort Telegram notifications.
//!
//! Delivery failures are logged and swallowed: a broken notification
//! channel must never look like a polling failure or stop the loop.

use crate::config::Config;
use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends text messages to one fixed chat via the Bot API.
pub struct TelegramNotifier {
    http: Client,
    token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    /// Build a notifier with explicit timeouts. Failure here is startup-fatal.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .user_agent("reviewbot")
            .build()
            .context("Failed to create HTTP client for Telegram")?;

        Ok(Self {
            http,
            token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            api_base: TELEGRAM_API_BASE.to_string(),
        })
    }

    /// Point the notifier at a different Bot API host (local stubs, proxies).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Deliver `message` to the configured chat, best-effort.
    ///
    /// Never returns an error: failures are logged at warn and dropped.
    pub fn notify(&self, message: &str) {
        match self.send(message) {
            Ok(()) => debug!("delivered Telegram message"),
            Err(e) => warn!("failed to deliver Telegram message: {e:#}"),
        }
    }

    fn send(&self, message: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let response = self
            .http
            .post(&url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text: message,
            })
            .send()
            .context("Failed to reach the Telegram API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("Telegram API returned HTTP {}: {body}", status.as_u16());
        }
        Ok(())
    }
}
