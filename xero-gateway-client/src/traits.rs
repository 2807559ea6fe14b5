use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::headers::HeaderContext;
use crate::scopes::{ScopeSet, SessionProfile};
use crate::types::{
    Contact, ContactQuery, Employee, EmployeeQuery, Invoice, InvoiceBatch, InvoiceUpdate, Quote,
    QuoteQuery, TaxRate,
};

/// Raw error extracted from a non-2xx response (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code
    pub status: u16,
    /// Error code or type, when the body carries one
    pub code: Option<String>,
    /// Best human-readable message found in the body
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context used while mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Identifier of the resource the request addressed (for `NotFound`)
    pub resource: Option<String>,
}

impl ErrorContext {
    pub fn resource(id: impl Into<String>) -> Self {
        Self {
            resource: Some(id.into()),
        }
    }
}

/// Maps raw API errors to [`ApiError`] (internal).
/// Implemented once per remote API surface.
pub(crate) trait ApiErrorMapper {
    /// Surface identifier used in errors and logs
    fn api_name(&self) -> &'static str;

    /// Map a raw error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError;

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ApiError {
        ApiError::Unknown {
            api: self.api_name().to_string(),
            status: Some(raw.status),
            raw_message: raw.message,
        }
    }
}

/// An authenticated session bound to one tenant and one scope set.
///
/// Created per handler invocation and dropped when it returns. Every call
/// takes the [`HeaderContext`] built for that invocation.
#[async_trait]
pub trait XeroSession: Send + Sync {
    /// Organisation the session is bound to.
    fn tenant_id(&self) -> &str;

    /// Scopes the session was authenticated with.
    fn scopes(&self) -> &ScopeSet;

    /// Organisation short code, fetched on first use and cached for the
    /// session lifetime. `None` when the organisation reports none.
    async fn short_code(&self, ctx: &HeaderContext) -> Result<Option<String>>;

    /// List contacts (summary form). `None` when the response has no collection.
    async fn list_contacts(
        &self,
        query: &ContactQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Contact>>>;

    /// List quotes.
    async fn list_quotes(
        &self,
        query: &QuoteQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Quote>>>;

    /// List tax rates.
    async fn list_tax_rates(&self, ctx: &HeaderContext) -> Result<Option<Vec<TaxRate>>>;

    /// List payroll employees. Requires a payroll-scoped session.
    async fn list_payroll_employees(
        &self,
        query: &EmployeeQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Employee>>>;

    /// Fetch one invoice. `None` when the response holds no invoice.
    async fn get_invoice(&self, invoice_id: &str, ctx: &HeaderContext) -> Result<Option<Invoice>>;

    /// Apply a batch update to one invoice and return the invoices the API echoed back.
    async fn update_invoice(
        &self,
        invoice_id: &str,
        batch: &InvoiceBatch<InvoiceUpdate>,
        ctx: &HeaderContext,
    ) -> Result<Vec<Invoice>>;
}

/// Creates and authenticates sessions.
///
/// The production implementation is [`XeroClient`](crate::XeroClient); handler
/// tests substitute in-memory implementations.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Scope set a handler of the given profile should request.
    fn scopes_for(&self, profile: SessionProfile) -> ScopeSet {
        profile.default_scopes()
    }

    /// Create a session for `scopes` and authenticate it.
    async fn open_session(&self, scopes: &ScopeSet) -> Result<Arc<dyn XeroSession>>;
}
