//! Envelope validation and status interpretation.
//!
//! Validation only checks that the envelope is well-formed; whether a
//! record is meaningful is decided here too, but separately, when the
//! latest record is interpreted.

use crate::error::{ResponseError, StatusError};
use serde_json::Value;

/// Closed set of review statuses and their fixed verdict phrases.
pub const HOMEWORK_VERDICTS: [(&str, &str); 3] = [
    (
        "approved",
        "The reviewer checked the work: everything looks good. Hooray!",
    ),
    ("reviewing", "The work was taken up for review."),
    (
        "rejected",
        "The reviewer checked the work: there are some remarks.",
    ),
];

/// Verdict phrase for a known status code.
pub fn verdict_for(status: &str) -> Option<&'static str> {
    HOMEWORK_VERDICTS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, verdict)| *verdict)
}

/// Pull the homework list out of the response envelope.
///
/// Only the envelope shape is enforced; malformed records inside the list
/// are rejected later by [`interpret_latest`].
pub fn extract_homeworks(response: &Value) -> Result<&Vec<Value>, ResponseError> {
    let object = response.as_object().ok_or(ResponseError::NotAnObject)?;
    let homeworks = object
        .get("homeworks")
        .ok_or(ResponseError::MissingHomeworks)?;
    homeworks
        .as_array()
        .ok_or(ResponseError::HomeworksNotAnArray)
}

/// Interpret the newest record (the API returns newest-first).
///
/// `Ok(None)` means nothing changed; silence is the common case. The
/// message text is a compatibility contract with downstream consumers and
/// must not be reworded.
pub fn interpret_latest(homeworks: &[Value]) -> Result<Option<String>, StatusError> {
    let Some(homework) = homeworks.first() else {
        return Ok(None);
    };

    let name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(StatusError::MissingField("homework_name"))?;
    let status = homework
        .get("status")
        .and_then(Value::as_str)
        .ok_or(StatusError::MissingField("status"))?;

    let verdict =
        verdict_for(status).ok_or_else(|| StatusError::UnknownStatus(status.to_string()))?;

    Ok(Some(format!(
        "Changed review status of work \"{name}\". {verdict}"
    )))
}
