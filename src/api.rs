//! Client for the homework review API.

use crate::config::Config;
use crate::error::ApiError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

// Bound the worst-case cycle latency; the default client has no total timeout.
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Issues authenticated status requests against the review endpoint.
pub struct ReviewApiClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl ReviewApiClient {
    /// Build a client with explicit timeouts. Failure here is startup-fatal.
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .user_agent("reviewbot")
            .build()
            .context("Failed to create HTTP client for the review API")?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }

    /// One `GET {endpoint}?from_date={from_date}` attempt, no retries.
    ///
    /// The server performs the incremental filtering: `from_date` is the
    /// watermark and only records updated after it come back. Returns the
    /// decoded body as raw JSON; envelope validation happens downstream.
    pub fn fetch(&self, from_date: u64) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if status != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                endpoint: self.endpoint.clone(),
                from_date,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn test_config(endpoint: &str) -> Config {
        Config {
            practicum_token: "api-token".to_string(),
            telegram_token: "bot-token".to_string(),
            telegram_chat_id: "12345".to_string(),
            poll_interval: Duration::from_secs(600),
            endpoint: endpoint.to_string(),
        }
    }

    /// Serve exactly one canned HTTP response on a local port.
    fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/")
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        // Port 9 (discard) is almost never listening locally.
        let client = ReviewApiClient::new(&test_config("http://127.0.0.1:9/")).unwrap();
        let err = client.fetch(0).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn non_200_surfaces_status_and_body() {
        let endpoint = one_shot_server("HTTP/1.1 503 Service Unavailable", "down for maintenance");
        let client = ReviewApiClient::new(&test_config(&endpoint)).unwrap();

        match client.fetch(1700000000).unwrap_err() {
            ApiError::UnexpectedStatus {
                endpoint: e,
                from_date,
                status,
                body,
            } => {
                assert_eq!(e, endpoint);
                assert_eq!(from_date, 1700000000);
                assert_eq!(status, 503);
                assert_eq!(body, "down for maintenance");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let endpoint = one_shot_server("HTTP/1.1 200 OK", "not json at all");
        let client = ReviewApiClient::new(&test_config(&endpoint)).unwrap();
        let err = client.fetch(0).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn valid_json_round_trips() {
        let endpoint = one_shot_server("HTTP/1.1 200 OK", r#"{"homeworks":[],"current_date":42}"#);
        let client = ReviewApiClient::new(&test_config(&endpoint)).unwrap();
        let value = client.fetch(0).unwrap();
        assert_eq!(value["current_date"], 42);
        assert!(value["homeworks"].as_array().unwrap().is_empty());
    }
}
