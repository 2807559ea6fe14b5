//! # xero-gateway-client
//!
//! Session-scoped client for the Xero accounting and payroll (NZ) APIs.
//!
//! ## Authentication
//!
//! | Mode | Config | Flow |
//! |------|--------|------|
//! | Custom connection | [`Credentials::ClientCredentials`] | OAuth2 client-credentials exchange per session |
//! | Bearer token | [`Credentials::BearerToken`] | Pre-issued token used as-is |
//!
//! Either way the tenant is resolved from `GET /connections` (first entry).
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: use rustls.
//! - **`native-tls`**: use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use xero_gateway_client::{
//!     ClientConfig, ContactQuery, Credentials, HeaderContext, ScopeSet, XeroClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(Credentials::ClientCredentials {
//!         client_id: "client-id".to_string(),
//!         client_secret: "client-secret".to_string(),
//!     });
//!     let client = XeroClient::new(config)?;
//!
//!     // 1. Create and authenticate a session (accounting scopes)
//!     let session = client.create_session(None).authenticate().await?;
//!
//!     // 2. Call the accounting API with a fresh header context
//!     let contacts = session
//!         .accounting()
//!         .list_contacts(&ContactQuery::default(), &HeaderContext::for_read())
//!         .await?
//!         .unwrap_or_default();
//!     println!("{} contacts", contacts.len());
//!
//!     // 3. Payroll needs its own scope set
//!     let payroll = client
//!         .create_session(Some(ScopeSet::payroll()))
//!         .authenticate()
//!         .await?;
//!     let _ = payroll;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Nothing is retried:
//! [`ApiError::NetworkError`], [`ApiError::Timeout`] and [`ApiError::RateLimited`]
//! are reported once and left to the caller.

mod api;
mod auth;
mod config;
pub mod deeplink;
mod error;
mod headers;
mod http_client;
mod scopes;
mod session;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, Result};

pub use api::{AccountingApi, PayrollApi};
pub use config::{ClientConfig, Credentials, DEFAULT_API_BASE_URL, DEFAULT_IDENTITY_URL};
pub use deeplink::{DeepLinkType, UnknownDeepLinkType};
pub use headers::{CORRELATION_ID_HEADER, HeaderContext, IDEMPOTENCY_KEY_HEADER, USER_AGENT};
pub use scopes::{
    DEFAULT_ACCOUNTING_SCOPES, DEFAULT_PAYROLL_SCOPES, PAYROLL_EMPLOYEES_SCOPE, ScopeSet,
    SessionProfile,
};
pub use session::{TENANT_ID_HEADER, UnauthenticatedSession, XeroApiSession, XeroClient};

// Re-export the session seams (internal mapping traits are not exported)
pub use traits::{SessionProvider, XeroSession};

pub use types::{
    Contact, ContactQuery, Employee, EmployeeQuery, Invoice, InvoiceBatch, InvoiceLineItem,
    InvoiceStatus, InvoiceUpdate, Organisation, Quote, QuoteQuery, TaxRate,
};

// Re-export utils module
pub use utils::log_sanitizer;
