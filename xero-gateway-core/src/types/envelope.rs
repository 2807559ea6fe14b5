//! Uniform handler result

use serde::Serialize;

use crate::error::{CoreError, CoreResult, ErrorKind};

/// What every handler returns, success or failure.
///
/// Only [`ResultEnvelope::success`] and [`ResultEnvelope::failure`] build one,
/// so `is_error == error.is_some()` and `result.is_none()` whenever `is_error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    result: Option<T>,
    is_error: bool,
    error: Option<String>,
    error_kind: Option<ErrorKind>,
}

impl<T> ResultEnvelope<T> {
    #[must_use]
    pub fn success(result: T) -> Self {
        Self {
            result: Some(result),
            is_error: false,
            error: None,
            error_kind: None,
        }
    }

    #[must_use]
    pub fn failure(error: &CoreError) -> Self {
        Self {
            result: None,
            is_error: true,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// Consume the envelope, keeping the success payload.
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}

impl<T> From<CoreResult<T>> for ResultEnvelope<T> {
    fn from(value: CoreResult<T>) -> Self {
        match value {
            Ok(result) => Self::success(result),
            Err(e) => Self::failure(&e),
        }
    }
}
