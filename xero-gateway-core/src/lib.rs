//! Xero Gateway Core Library
//!
//! Handler layer on top of `xero-gateway-client`:
//! - Contact, quote and tax rate listing
//! - Payroll employee listing
//! - DRAFT-only invoice update
//! - Deep link resolution
//!
//! Every handler opens its own session through a [`SessionProvider`](xero_gateway_client::SessionProvider)
//! and reports through a uniform [`ResultEnvelope`](types::ResultEnvelope).

pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ErrorKind};
pub use services::{
    resolve_link, ContactService, DeepLinkService, InvoiceService, PayrollService, QuoteService,
    ServiceContext, TaxRateService,
};
pub use types::ResultEnvelope;
