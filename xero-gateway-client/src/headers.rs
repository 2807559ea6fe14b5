//! Per-call header context attached to every remote request.

use reqwest::RequestBuilder;
use uuid::Uuid;

/// `User-Agent` sent on every request.
pub const USER_AGENT: &str = concat!("xero-gateway/", env!("CARGO_PKG_VERSION"));

/// Header carrying the per-call correlation id.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-Id";
/// Header carrying the write idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Trace and idempotency metadata for one remote call.
///
/// Built fresh for each handler invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderContext {
    user_agent: String,
    correlation_id: Uuid,
    idempotency_key: Option<Uuid>,
}

impl HeaderContext {
    /// Context for read-only calls.
    #[must_use]
    pub fn for_read() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            correlation_id: Uuid::new_v4(),
            idempotency_key: None,
        }
    }

    /// Context for a write; carries an idempotency key so the remote side can
    /// de-duplicate a request it already applied.
    #[must_use]
    pub fn for_write() -> Self {
        Self {
            idempotency_key: Some(Uuid::new_v4()),
            ..Self::for_read()
        }
    }

    /// Reuse a caller-supplied correlation id instead of a fresh one.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn idempotency_key(&self) -> Option<Uuid> {
        self.idempotency_key
    }

    /// Header name/value pairs in the order they are sent.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("User-Agent", self.user_agent.clone()),
            (CORRELATION_ID_HEADER, self.correlation_id.to_string()),
        ];
        if let Some(key) = self.idempotency_key {
            headers.push((IDEMPOTENCY_KEY_HEADER, key.to_string()));
        }
        headers
    }

    pub(crate) fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (name, value) in self.headers() {
            request = request.header(name, value);
        }
        request
    }
}
