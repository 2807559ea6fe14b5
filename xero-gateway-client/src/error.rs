use serde::{Deserialize, Serialize};

/// Unified error type for all remote Xero API operations.
///
/// Each variant carries an `api` field naming the remote surface that produced it
/// (`identity`, `connections`, `accounting` or `payroll`), plus variant-specific context.
/// All variants are serializable for structured error reporting.
///
/// Nothing in this crate retries. Transient variants ([`NetworkError`](Self::NetworkError),
/// [`Timeout`](Self::Timeout), [`RateLimited`](Self::RateLimited)) are reported once and
/// left to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx gateway).
    NetworkError {
        /// API surface that produced the error.
        api: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// API surface that produced the error.
        api: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// API surface that produced the error.
        api: String,
        /// Suggested wait time in seconds, from the `Retry-After` header.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The client credentials or access token were rejected.
    InvalidCredentials {
        /// API surface that produced the error.
        api: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The token is valid but lacks the scope or role for this operation.
    PermissionDenied {
        /// API surface that produced the error.
        api: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The token is not connected to any organisation.
    TenantUnavailable {
        /// Error details.
        detail: String,
    },

    /// The requested resource does not exist.
    NotFound {
        /// API surface that produced the error.
        api: String,
        /// Identifier of the missing resource.
        resource: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rejected the request payload (HTTP 400 validation exception).
    ValidationFailed {
        /// API surface that produced the error.
        api: String,
        /// First validation message reported by the API.
        detail: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// API surface that produced the error.
        api: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body or build the HTTP client.
    SerializationError {
        /// API surface that produced the error.
        api: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    Unknown {
        /// API surface that produced the error.
        api: String,
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ApiError {
    /// Whether this is expected behavior (bad input, missing resource, etc.), used to pick the log level.
    ///
    /// `true` logs at `warn`, `false` at `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::TenantUnavailable { .. }
                | Self::NotFound { .. }
                | Self::ValidationFailed { .. }
        )
    }

    /// Whether the failure happened while acquiring the session rather than using it.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::TenantUnavailable { .. }
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { api, detail } => {
                write!(f, "[{api}] Network error: {detail}")
            }
            Self::Timeout { api, detail } => {
                write!(f, "[{api}] Request timeout: {detail}")
            }
            Self::RateLimited {
                api, retry_after, ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{api}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{api}] Rate limited")
                }
            }
            Self::InvalidCredentials { api, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{api}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{api}] Invalid credentials")
                }
            }
            Self::PermissionDenied { api, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{api}] Permission denied: {msg}")
                } else {
                    write!(f, "[{api}] Permission denied")
                }
            }
            Self::TenantUnavailable { detail } => {
                write!(f, "[connections] No organisation available: {detail}")
            }
            Self::NotFound {
                api,
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{api}] '{resource}' not found: {msg}")
                } else {
                    write!(f, "[{api}] '{resource}' not found")
                }
            }
            Self::ValidationFailed { api, detail } => {
                write!(f, "[{api}] Validation failed: {detail}")
            }
            Self::ParseError { api, detail } => {
                write!(f, "[{api}] Parse error: {detail}")
            }
            Self::SerializationError { api, detail } => {
                write!(f, "[{api}] Serialization error: {detail}")
            }
            Self::Unknown {
                api,
                status,
                raw_message,
            } => {
                if let Some(status) = status {
                    write!(f, "[{api}] HTTP {status}: {raw_message}")
                } else {
                    write!(f, "[{api}] {raw_message}")
                }
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
