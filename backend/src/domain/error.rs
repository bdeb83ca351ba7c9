//! Failure raised when validation cannot reach a verdict.
//!
//! Rejections are not errors; they travel in `ValidationOutcome`. An `Error`
//! means a rule could not read the state it needs, so the caller must not
//! treat the reservation as admitted or rejected.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A backing store needed for the verdict is unreachable.
    ServiceUnavailable,
    /// The backing store answered, but not with something usable.
    InternalError,
}

/// Verdict-less failure, serialised as `{code, message, details?}`.
///
/// # Examples
/// ```
/// use reservations::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::internal("ledger lookup failed")
///     .with_details(json!({ "rule": "credits" }));
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert!(err.details().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ThisError)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    fn with_code(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
        }
    }

    /// A backing store could not be reached.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::ServiceUnavailable, message.into())
    }

    /// A backing store returned something the rule cannot use.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::InternalError, message.into())
    }

    /// Attach structured context such as the failing rule.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}
