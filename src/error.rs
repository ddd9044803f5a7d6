//! Typed errors for each stage of a poll cycle.
//!
//! Every error carries its own diagnostic payload; the poll loop catches
//! all of them uniformly and never branches on the variant.

use thiserror::Error;

/// Failures while calling the review API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself could not complete (refused, timeout, DNS).
    #[error("request to the review API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call completed with a status code other than 200.
    #[error("review API returned HTTP {status} for {endpoint}?from_date={from_date}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        from_date: u64,
        status: u16,
        body: String,
    },

    /// The body was not valid JSON.
    #[error("review API response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Structural violations of the response envelope.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no \"homeworks\" key")]
    MissingHomeworks,

    #[error("value under \"homeworks\" is not an array")]
    HomeworksNotAnArray,
}

/// Malformed or unrecognized homework records.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("homework record is missing the \"{0}\" field")]
    MissingField(&'static str),

    #[error("unknown homework status \"{0}\"")]
    UnknownStatus(String),
}

/// Union of everything that can fail inside one poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Status(#[from] StatusError),
}
