//! Resource handlers
//!
//! Every public handler method returns a [`ResultEnvelope`]; failures are
//! logged and folded into the envelope here, never propagated.

mod contact_service;
mod deep_link_service;
mod invoice_service;
mod payroll_service;
mod quote_service;
mod tax_rate_service;

pub use contact_service::ContactService;
pub use deep_link_service::{resolve_link, DeepLinkService};
pub use invoice_service::InvoiceService;
pub use payroll_service::PayrollService;
pub use quote_service::QuoteService;
pub use tax_rate_service::TaxRateService;

use std::sync::Arc;

use xero_gateway_client::{SessionProfile, SessionProvider, XeroSession};

use crate::error::{CoreError, CoreResult};
use crate::types::ResultEnvelope;

/// Service context: holds the session provider every handler draws from.
pub struct ServiceContext {
    /// Creates and authenticates sessions
    pub session_provider: Arc<dyn SessionProvider>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(session_provider: Arc<dyn SessionProvider>) -> Self {
        Self { session_provider }
    }

    /// Open one authenticated session for a handler invocation.
    ///
    /// Any failure here is an authentication failure.
    pub async fn open_session(&self, profile: SessionProfile) -> CoreResult<Arc<dyn XeroSession>> {
        let scopes = self.session_provider.scopes_for(profile);
        log::debug!("Opening {profile:?} session with scopes '{scopes}'");
        self.session_provider
            .open_session(&scopes)
            .await
            .map_err(CoreError::Authentication)
    }
}

/// Fold a handler result into an envelope, logging failures by severity.
pub(crate) fn respond<T>(operation: &str, result: CoreResult<T>) -> ResultEnvelope<T> {
    if let Err(e) = &result {
        if e.is_expected() {
            log::warn!("{operation} failed: {e}");
        } else {
            log::error!("{operation} failed: {e}");
        }
    }
    result.into()
}
