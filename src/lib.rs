//! Long-running poller for the homework review API.
//!
//! One cycle: fetch the latest statuses, validate the envelope, interpret
//! the newest record, push a Telegram notification if the status changed,
//! then sleep. Failures never escape the loop.

pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod status;
pub mod telegram;
