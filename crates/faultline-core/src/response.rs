//! Transport boundary: status codes and JSON bodies
//!
//! Outcomes map to 200 (or 204 when there is nothing to say), faults map to
//! the status of their kind with a `{message, extras}` body, and anything
//! else is an unexpected failure reported as a bodiless 500.

use crate::fault::Fault;
use crate::message::Message;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_OK: u16 = 200;
pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Body written for a fault
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    #[serde(skip_serializing_if = "no_extras")]
    pub extras: &'a [Message],
}

fn no_extras(extras: &&[Message]) -> bool {
    extras.is_empty()
}

impl<'a> From<&'a Fault> for ErrorBody<'a> {
    fn from(fault: &'a Fault) -> Self {
        Self {
            message: Some(fault.primary_text()).filter(|text| !text.is_empty()),
            extras: fault.messages(),
        }
    }
}

/// A status code and optional JSON body, ready for any HTTP layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Response {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn internal_error() -> Self {
        Self::new(STATUS_INTERNAL_SERVER_ERROR, None)
    }
}

/// Map a successful outcome
///
/// A contentless outcome without messages has nothing to report and maps to
/// 204.
pub fn map_outcome<T: Serialize>(outcome: &Outcome<T>) -> Response {
    if !outcome.has_content() && !outcome.has_messages() {
        tracing::debug!(status = STATUS_NO_CONTENT, "Mapped outcome");
        return Response::new(STATUS_NO_CONTENT, None);
    }

    match serde_json::to_value(outcome) {
        Ok(body) => {
            tracing::debug!(status = STATUS_OK, messages = outcome.messages().len(), "Mapped outcome");
            Response::new(STATUS_OK, Some(body))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize outcome");
            Response::internal_error()
        }
    }
}

/// Map a client fault to its status and `{message, extras}` body
pub fn map_fault(fault: &Fault) -> Response {
    let status = fault.status_code();
    tracing::debug!(status, kind = %fault.kind(), messages = fault.messages().len(), "Mapped fault");

    match serde_json::to_value(ErrorBody::from(fault)) {
        Ok(body) => Response::new(status, Some(body)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize fault");
            Response::internal_error()
        }
    }
}

/// Map any error reaching the boundary
///
/// Faults keep their mapping; every other error becomes a 500 without a
/// body and is only logged.
pub fn map_error(error: &(dyn std::error::Error + 'static)) -> Response {
    if let Some(fault) = error.downcast_ref::<Fault>() {
        return map_fault(fault);
    }

    tracing::error!(error = %error, "Unhandled error mapped to internal server error");
    Response::internal_error()
}

/// Map the result of an operation returning an outcome or a fault
pub fn map_result<T: Serialize>(result: &Result<Outcome<T>, Fault>) -> Response {
    match result {
        Ok(outcome) => map_outcome(outcome),
        Err(fault) => map_fault(fault),
    }
}
