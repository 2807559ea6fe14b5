//! Test helpers
//!
//! In-memory session and session provider that record every call.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Map;
use tokio::sync::Mutex;
use xero_gateway_client::{
    ApiError, Contact, ContactQuery, Employee, EmployeeQuery, HeaderContext, Invoice,
    InvoiceBatch, InvoiceLineItem, InvoiceUpdate, Quote, QuoteQuery, Result, ScopeSet,
    SessionProvider, TaxRate, XeroSession,
};

use crate::services::ServiceContext;

// ===== MockSession =====

pub struct MockSession {
    scopes: ScopeSet,
    contacts: Option<Vec<Contact>>,
    quotes: Option<Vec<Quote>>,
    tax_rates: Option<Vec<TaxRate>>,
    employees: Option<Vec<Employee>>,
    invoice: Option<Invoice>,
    updated: Vec<Invoice>,
    short_code: Option<String>,
    /// If Some, every remote call fails with this error
    error: Option<ApiError>,
    calls: Mutex<Vec<&'static str>>,
    contact_pages: Mutex<Vec<Option<u32>>>,
    quote_queries: Mutex<Vec<QuoteQuery>>,
    /// (invoice id, payload, idempotency key present)
    writes: Mutex<Vec<(String, InvoiceBatch<InvoiceUpdate>, bool)>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            scopes: ScopeSet::accounting(),
            contacts: None,
            quotes: None,
            tax_rates: None,
            employees: None,
            invoice: None,
            updated: Vec::new(),
            short_code: None,
            error: None,
            calls: Mutex::new(Vec::new()),
            contact_pages: Mutex::new(Vec::new()),
            quote_queries: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_contacts(mut self, contacts: Option<Vec<Contact>>) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn with_tax_rates(mut self, tax_rates: Option<Vec<TaxRate>>) -> Self {
        self.tax_rates = tax_rates;
        self
    }

    pub fn with_invoice(mut self, invoice: Option<Invoice>) -> Self {
        self.invoice = invoice;
        self
    }

    pub fn with_updated(mut self, updated: Vec<Invoice>) -> Self {
        self.updated = updated;
        self
    }

    pub fn with_short_code(mut self, short_code: Option<&str>) -> Self {
        self.short_code = short_code.map(str::to_string);
        self
    }

    pub fn with_error(mut self, error: ApiError) -> Self {
        self.error = Some(error);
        self
    }

    pub async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    pub async fn contact_pages(&self) -> Vec<Option<u32>> {
        self.contact_pages.lock().await.clone()
    }

    pub async fn quote_queries(&self) -> Vec<QuoteQuery> {
        self.quote_queries.lock().await.clone()
    }

    pub async fn writes(&self) -> Vec<(String, InvoiceBatch<InvoiceUpdate>, bool)> {
        self.writes.lock().await.clone()
    }

    async fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().await.push(call);
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl XeroSession for MockSession {
    fn tenant_id(&self) -> &str {
        "tenant-test"
    }

    fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    async fn short_code(&self, _ctx: &HeaderContext) -> Result<Option<String>> {
        self.record("short_code").await?;
        Ok(self.short_code.clone())
    }

    async fn list_contacts(
        &self,
        query: &ContactQuery,
        _ctx: &HeaderContext,
    ) -> Result<Option<Vec<Contact>>> {
        self.contact_pages.lock().await.push(query.page);
        self.record("list_contacts").await?;
        Ok(self.contacts.clone())
    }

    async fn list_quotes(
        &self,
        query: &QuoteQuery,
        _ctx: &HeaderContext,
    ) -> Result<Option<Vec<Quote>>> {
        self.quote_queries.lock().await.push(query.clone());
        self.record("list_quotes").await?;
        Ok(self.quotes.clone())
    }

    async fn list_tax_rates(&self, _ctx: &HeaderContext) -> Result<Option<Vec<TaxRate>>> {
        self.record("list_tax_rates").await?;
        Ok(self.tax_rates.clone())
    }

    async fn list_payroll_employees(
        &self,
        _query: &EmployeeQuery,
        _ctx: &HeaderContext,
    ) -> Result<Option<Vec<Employee>>> {
        self.record("list_payroll_employees").await?;
        Ok(self.employees.clone())
    }

    async fn get_invoice(&self, _invoice_id: &str, _ctx: &HeaderContext) -> Result<Option<Invoice>> {
        self.record("get_invoice").await?;
        Ok(self.invoice.clone())
    }

    async fn update_invoice(
        &self,
        invoice_id: &str,
        batch: &InvoiceBatch<InvoiceUpdate>,
        ctx: &HeaderContext,
    ) -> Result<Vec<Invoice>> {
        self.writes.lock().await.push((
            invoice_id.to_string(),
            batch.clone(),
            ctx.idempotency_key().is_some(),
        ));
        self.record("update_invoice").await?;
        Ok(self.updated.clone())
    }
}

// ===== MockSessionProvider =====

pub struct MockSessionProvider {
    session: Arc<MockSession>,
    /// If Some, open_session fails with this error
    auth_error: Option<ApiError>,
    requested_scopes: Mutex<Vec<ScopeSet>>,
}

impl MockSessionProvider {
    pub fn new(session: Arc<MockSession>) -> Self {
        Self {
            session,
            auth_error: None,
            requested_scopes: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            auth_error: Some(error),
            ..Self::new(Arc::new(MockSession::new()))
        }
    }

    pub async fn requested_scopes(&self) -> Vec<ScopeSet> {
        self.requested_scopes.lock().await.clone()
    }

    pub async fn opened_sessions(&self) -> usize {
        self.requested_scopes.lock().await.len()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn open_session(&self, scopes: &ScopeSet) -> Result<Arc<dyn XeroSession>> {
        self.requested_scopes.lock().await.push(scopes.clone());
        if let Some(e) = &self.auth_error {
            return Err(e.clone());
        }
        let session: Arc<dyn XeroSession> = self.session.clone();
        Ok(session)
    }
}

// ===== Factories =====

/// Context backed by a provider that always hands out `session`.
pub fn create_test_context(
    session: MockSession,
) -> (Arc<ServiceContext>, Arc<MockSessionProvider>, Arc<MockSession>) {
    create_test_context_with(MockSessionProvider::new(Arc::new(session)))
}

pub fn create_test_context_with(
    provider: MockSessionProvider,
) -> (Arc<ServiceContext>, Arc<MockSessionProvider>, Arc<MockSession>) {
    let session = Arc::clone(&provider.session);
    let provider = Arc::new(provider);
    let ctx = Arc::new(ServiceContext::new(provider.clone()));
    (ctx, provider, session)
}

pub fn contact(id: &str, name: &str) -> Contact {
    Contact {
        contact_id: Some(id.to_string()),
        name: Some(name.to_string()),
        extra: Map::new(),
    }
}

pub fn tax_rate(name: &str, tax_type: &str) -> TaxRate {
    TaxRate {
        name: Some(name.to_string()),
        tax_type: Some(tax_type.to_string()),
        extra: Map::new(),
    }
}

pub fn invoice(id: &str, status: &str) -> Invoice {
    Invoice {
        invoice_id: Some(id.to_string()),
        invoice_number: Some("INV-0001".to_string()),
        status: Some(status.to_string()),
        extra: Map::new(),
    }
}

pub fn line_item() -> InvoiceLineItem {
    InvoiceLineItem {
        description: "Consulting".to_string(),
        quantity: 2.0,
        unit_amount: 150.0,
        account_code: "200".to_string(),
        tax_type: "OUTPUT2".to_string(),
    }
}
