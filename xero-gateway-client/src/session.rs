//! Session acquisition: client, unauthenticated session, authenticated session

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use tokio::sync::OnceCell;

use crate::api::{AccountingApi, PayrollApi};
use crate::auth::{self, AccessToken};
use crate::config::{ClientConfig, Credentials};
use crate::error::{ApiError, Result};
use crate::headers::HeaderContext;
use crate::scopes::{ScopeSet, SessionProfile};
use crate::traits::{SessionProvider, XeroSession};
use crate::types::{
    Contact, ContactQuery, Employee, EmployeeQuery, Invoice, InvoiceBatch, InvoiceUpdate, Quote,
    QuoteQuery, TaxRate,
};

/// Header naming the organisation a request targets.
pub const TENANT_ID_HEADER: &str = "xero-tenant-id";

/// Entry point: owns the HTTP connection pool and configuration.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct XeroClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl XeroClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::SerializationError {
                api: "client".to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Start a session for `scopes`, or the configured accounting scopes when `None`.
    ///
    /// The returned session cannot issue calls until [`UnauthenticatedSession::authenticate`]
    /// has succeeded.
    pub fn create_session(&self, scopes: Option<ScopeSet>) -> UnauthenticatedSession {
        UnauthenticatedSession {
            http: self.http.clone(),
            config: Arc::clone(&self.config),
            scopes: scopes.unwrap_or_else(|| self.config.scopes_for(SessionProfile::Accounting)),
        }
    }
}

#[async_trait]
impl SessionProvider for XeroClient {
    fn scopes_for(&self, profile: SessionProfile) -> ScopeSet {
        self.config.scopes_for(profile)
    }

    async fn open_session(&self, scopes: &ScopeSet) -> Result<Arc<dyn XeroSession>> {
        let session = self.create_session(Some(scopes.clone())).authenticate().await?;
        Ok(Arc::new(session))
    }
}

/// A session that has not obtained a token yet.
#[derive(Debug)]
pub struct UnauthenticatedSession {
    http: Client,
    config: Arc<ClientConfig>,
    scopes: ScopeSet,
}

impl UnauthenticatedSession {
    /// Obtain an access token and resolve the tenant.
    ///
    /// Runs the credential exchange at most once; failures are returned as-is.
    pub async fn authenticate(self) -> Result<XeroApiSession> {
        let ctx = HeaderContext::for_read();

        let token = match &self.config.credentials {
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => {
                log::debug!("[identity] Exchanging client credentials for {client_id}");
                auth::exchange_client_credentials(
                    &self.http,
                    &self.config,
                    client_id,
                    client_secret,
                    &self.scopes,
                    &ctx,
                )
                .await?
            }
            Credentials::BearerToken(token) => AccessToken::bearer(token.clone()),
        };

        let tenant_id = auth::resolve_tenant(&self.http, &self.config, &token, &ctx).await?;

        Ok(XeroApiSession {
            http: self.http,
            config: self.config,
            token,
            tenant_id,
            scopes: self.scopes,
            short_code: OnceCell::new(),
        })
    }
}

/// An authenticated session bound to one tenant.
///
/// Exposes every API surface from the same token, so one logical operation
/// never needs a second session.
#[derive(Debug)]
pub struct XeroApiSession {
    http: Client,
    config: Arc<ClientConfig>,
    token: AccessToken,
    tenant_id: String,
    scopes: ScopeSet,
    short_code: OnceCell<String>,
}

impl XeroApiSession {
    /// Accounting API (contacts, quotes, tax rates, invoices, organisation).
    pub fn accounting(&self) -> AccountingApi<'_> {
        AccountingApi::new(self)
    }

    /// Payroll NZ API (employees).
    pub fn payroll(&self) -> PayrollApi<'_> {
        PayrollApi::new(self)
    }

    /// Token expiry, when the issuer reported one.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.token.expires_at
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request carrying the session's auth, tenant and the call's header context.
    pub(crate) fn request(&self, method: Method, url: &str, ctx: &HeaderContext) -> RequestBuilder {
        ctx.apply(
            self.http
                .request(method, url)
                .bearer_auth(&self.token.value)
                .header(TENANT_ID_HEADER, &self.tenant_id)
                .header(ACCEPT, "application/json"),
        )
    }
}

#[async_trait]
impl XeroSession for XeroApiSession {
    fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    async fn short_code(&self, ctx: &HeaderContext) -> Result<Option<String>> {
        if let Some(code) = self.short_code.get() {
            return Ok(Some(code.clone()));
        }

        let organisation = self.accounting().get_organisation(ctx).await?;
        let code = organisation
            .and_then(|org| org.short_code)
            .filter(|code| !code.trim().is_empty());

        if let Some(code) = &code {
            // A concurrent caller may have filled the cell first; both values are equal.
            let _ = self.short_code.set(code.clone());
        }
        Ok(code)
    }

    async fn list_contacts(
        &self,
        query: &ContactQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Contact>>> {
        self.accounting().list_contacts(query, ctx).await
    }

    async fn list_quotes(
        &self,
        query: &QuoteQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Quote>>> {
        self.accounting().list_quotes(query, ctx).await
    }

    async fn list_tax_rates(&self, ctx: &HeaderContext) -> Result<Option<Vec<TaxRate>>> {
        self.accounting().list_tax_rates(ctx).await
    }

    async fn list_payroll_employees(
        &self,
        query: &EmployeeQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Employee>>> {
        self.payroll().list_employees(query, ctx).await
    }

    async fn get_invoice(&self, invoice_id: &str, ctx: &HeaderContext) -> Result<Option<Invoice>> {
        self.accounting().get_invoice(invoice_id, ctx).await
    }

    async fn update_invoice(
        &self,
        invoice_id: &str,
        batch: &InvoiceBatch<InvoiceUpdate>,
        ctx: &HeaderContext,
    ) -> Result<Vec<Invoice>> {
        self.accounting().update_invoice(invoice_id, batch, ctx).await
    }
}
