//! Unified error type definition

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export library error type
pub use xero_gateway_client::ApiError;

/// Failure category carried next to the message in every error envelope,
/// so callers can branch without matching on text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Session or token acquisition failed
    Authentication,
    /// Target entity absent
    NotFound,
    /// Local precondition (DRAFT-only guard) violated
    Precondition,
    /// Write accepted without a confirmed entity in the response
    RemoteWriteAmbiguous,
    /// Organisation short code missing, no deep link possible
    ShortCodeUnavailable,
    /// Any other network or HTTP failure
    RemoteTransport,
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Session could not be created or authenticated
    #[error("Authentication failed: {0}")]
    Authentication(ApiError),

    /// Invoice absent on read-before-write
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Invoice exists but is not editable
    #[error("Cannot update invoice because it is not a draft. Current status: {status}")]
    InvoiceNotDraft { invoice_id: String, status: String },

    /// Write returned no updated invoice
    #[error("Invoice update failed.")]
    InvoiceUpdateFailed { invoice_id: String },

    /// Organisation reported no short code
    #[error("Failed to retrieve organisation short code")]
    ShortCodeUnavailable,

    /// Remote call error (converting from library)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Category reported to callers alongside the message.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::InvoiceNotFound(_) => ErrorKind::NotFound,
            Self::InvoiceNotDraft { .. } => ErrorKind::Precondition,
            Self::InvoiceUpdateFailed { .. } => ErrorKind::RemoteWriteAmbiguous,
            Self::ShortCodeUnavailable => ErrorKind::ShortCodeUnavailable,
            Self::Api(e) if e.is_auth_failure() => ErrorKind::Authentication,
            Self::Api(ApiError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Api(_) => ErrorKind::RemoteTransport,
        }
    }

    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvoiceNotFound(_)
            | Self::InvoiceNotDraft { .. }
            | Self::ShortCodeUnavailable => true,
            Self::Authentication(e) | Self::Api(e) => e.is_expected(),
            Self::InvoiceUpdateFailed { .. } => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
