//! The poll loop: fetch, validate, interpret, notify, sleep, forever.

use crate::api::ReviewApiClient;
use crate::error::CycleError;
use crate::status::{extract_homeworks, interpret_latest};
use crate::telegram::TelegramNotifier;
use serde_json::Value;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

/// What one successful cycle produced.
#[derive(Debug, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Formatted notification, or `None` when nothing changed.
    pub message: Option<String>,
    /// Watermark for the next cycle's `from_date`.
    pub watermark: u64,
}

/// Evaluate one fetched envelope against the current watermark.
///
/// The watermark advances to the server-reported `current_date` only when
/// the whole cycle succeeds; a server that omits the field keeps the
/// previous watermark. Server time governs the query window, not the
/// local clock.
pub fn evaluate(response: &Value, watermark: u64) -> Result<CycleOutcome, CycleError> {
    let homeworks = extract_homeworks(response)?;
    let message = interpret_latest(homeworks)?;
    let watermark = response
        .get("current_date")
        .and_then(Value::as_u64)
        .unwrap_or(watermark);
    Ok(CycleOutcome { message, watermark })
}

/// Drives the cycle on a fixed cadence and contains every failure.
pub struct Poller {
    api: ReviewApiClient,
    notifier: TelegramNotifier,
    interval: Duration,
    watermark: u64,
}

impl Poller {
    /// The watermark starts at wall-clock now: only updates made after
    /// startup are of interest.
    pub fn new(api: ReviewApiClient, notifier: TelegramNotifier, interval: Duration) -> Self {
        let watermark = chrono::Utc::now().timestamp().max(0) as u64;
        Self {
            api,
            notifier,
            interval,
            watermark,
        }
    }

    /// Current watermark (next cycle's `from_date`).
    pub fn watermark(&self) -> u64 {
        self.watermark
    }

    /// Run forever. Never returns; the process ends only when killed.
    pub fn run(&mut self) -> ! {
        info!(
            interval_secs = self.interval.as_secs(),
            watermark = self.watermark,
            "starting poll loop"
        );
        loop {
            self.run_once();
            // The sleep runs on every path, success or failure, so cycles
            // never overlap and every error is followed by the same pause.
            thread::sleep(self.interval);
        }
    }

    /// One full cycle: fetch, evaluate, notify. Returns false when the
    /// cycle failed; the failure itself is logged and best-effort reported
    /// to the operator over the same notification channel.
    pub fn run_once(&mut self) -> bool {
        match self.run_cycle() {
            Ok(Some(message)) => {
                info!("review status changed, notifying");
                self.notifier.notify(&message);
                true
            }
            Ok(None) => {
                debug!("no review status change");
                true
            }
            Err(e) => {
                error!("poll cycle failed: {e}");
                self.notifier.notify(&format!("Program failure: {e}"));
                false
            }
        }
    }

    fn run_cycle(&mut self) -> Result<Option<String>, CycleError> {
        let response = self.api.fetch(self.watermark)?;
        let outcome = evaluate(&response, self.watermark)?;
        if outcome.watermark != self.watermark {
            debug!(
                from = self.watermark,
                to = outcome.watermark,
                "advancing watermark"
            );
        }
        self.watermark = outcome.watermark;
        Ok(outcome.message)
    }
}
