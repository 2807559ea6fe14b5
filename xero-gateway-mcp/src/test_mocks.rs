use super::*;

use async_trait::async_trait;
use serde_json::{json, Map};
use tokio::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xero_gateway_client::{
    ApiError, ClientConfig, Contact, ContactQuery, Credentials, Employee, EmployeeQuery,
    HeaderContext, Invoice, InvoiceBatch, InvoiceUpdate, Quote, QuoteQuery, ScopeSet,
    SessionProvider, TaxRate, XeroClient, XeroSession,
};

pub(super) const TENANT_ID: &str = "tenant-1";
pub(super) const ACCESS_TOKEN: &str = "tok-mcp-123456";

/// In-memory session with canned responses.
#[derive(Default)]
pub struct MockSession {
    pub contacts: Option<Vec<Contact>>,
    pub quotes: Option<Vec<Quote>>,
    pub tax_rates: Option<Vec<TaxRate>>,
    pub employees: Option<Vec<Employee>>,
    pub invoice: Option<Invoice>,
    pub updated: Vec<Invoice>,
    pub short_code: Option<String>,
    pub(crate) scopes: ScopeSet,
    pub(crate) quote_queries: Mutex<Vec<QuoteQuery>>,
    pub(crate) writes: Mutex<Vec<InvoiceBatch<InvoiceUpdate>>>,
}

impl MockSession {
    pub async fn quote_queries(&self) -> Vec<QuoteQuery> {
        self.quote_queries.lock().await.clone()
    }

    pub async fn writes(&self) -> Vec<InvoiceBatch<InvoiceUpdate>> {
        self.writes.lock().await.clone()
    }
}

#[async_trait]
impl XeroSession for MockSession {
    fn tenant_id(&self) -> &str {
        TENANT_ID
    }

    fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    async fn short_code(&self, _ctx: &HeaderContext) -> xero_gateway_client::Result<Option<String>> {
        Ok(self.short_code.clone())
    }

    async fn list_contacts(
        &self,
        _query: &ContactQuery,
        _ctx: &HeaderContext,
    ) -> xero_gateway_client::Result<Option<Vec<Contact>>> {
        Ok(self.contacts.clone())
    }

    async fn list_quotes(
        &self,
        query: &QuoteQuery,
        _ctx: &HeaderContext,
    ) -> xero_gateway_client::Result<Option<Vec<Quote>>> {
        self.quote_queries.lock().await.push(query.clone());
        Ok(self.quotes.clone())
    }

    async fn list_tax_rates(
        &self,
        _ctx: &HeaderContext,
    ) -> xero_gateway_client::Result<Option<Vec<TaxRate>>> {
        Ok(self.tax_rates.clone())
    }

    async fn list_payroll_employees(
        &self,
        _query: &EmployeeQuery,
        _ctx: &HeaderContext,
    ) -> xero_gateway_client::Result<Option<Vec<Employee>>> {
        Ok(self.employees.clone())
    }

    async fn get_invoice(
        &self,
        _invoice_id: &str,
        _ctx: &HeaderContext,
    ) -> xero_gateway_client::Result<Option<Invoice>> {
        Ok(self.invoice.clone())
    }

    async fn update_invoice(
        &self,
        _invoice_id: &str,
        batch: &InvoiceBatch<InvoiceUpdate>,
        _ctx: &HeaderContext,
    ) -> xero_gateway_client::Result<Vec<Invoice>> {
        self.writes.lock().await.push(batch.clone());
        Ok(self.updated.clone())
    }
}

/// Provider handing out one shared [`MockSession`], or failing every time.
pub struct MockSessionProvider {
    session: Arc<MockSession>,
    failure: Option<ApiError>,
    requested: Mutex<Vec<ScopeSet>>,
}

impl MockSessionProvider {
    pub fn new(session: MockSession) -> Self {
        Self {
            session: Arc::new(session),
            failure: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(MockSession::default())
        }
    }

    pub fn session(&self) -> Arc<MockSession> {
        Arc::clone(&self.session)
    }

    pub async fn requested_scopes(&self) -> Vec<ScopeSet> {
        self.requested.lock().await.clone()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn open_session(
        &self,
        scopes: &ScopeSet,
    ) -> xero_gateway_client::Result<Arc<dyn XeroSession>> {
        self.requested.lock().await.push(scopes.clone());
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        let session: Arc<dyn XeroSession> = self.session.clone();
        Ok(session)
    }
}

pub(super) fn build_server(provider: Arc<MockSessionProvider>) -> XeroGatewayMcp {
    let ctx = Arc::new(ServiceContext::new(provider));
    XeroGatewayMcp::new(&ctx)
}

/// Server backed by a real client talking to `server` with a bearer token.
pub(super) async fn build_http_server(server: &MockServer) -> XeroGatewayMcp {
    Mock::given(method("GET"))
        .and(path("/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "conn-1",
            "tenantId": TENANT_ID,
            "tenantType": "ORGANISATION",
            "tenantName": "Demo Company (NZ)"
        }])))
        .mount(server)
        .await;

    let config = ClientConfig::new(Credentials::BearerToken(ACCESS_TOKEN.to_string()))
        .with_api_base_url(server.uri())
        .with_identity_url(server.uri());
    let client = XeroClient::new(config).unwrap();
    let ctx = Arc::new(ServiceContext::new(Arc::new(client)));
    XeroGatewayMcp::new(&ctx)
}

pub fn test_contact(id: &str, name: &str) -> Contact {
    Contact {
        contact_id: Some(id.to_string()),
        name: Some(name.to_string()),
        extra: Map::new(),
    }
}

pub fn test_invoice(id: &str, status: &str) -> Invoice {
    Invoice {
        invoice_id: Some(id.to_string()),
        invoice_number: Some("INV-0042".to_string()),
        status: Some(status.to_string()),
        extra: Map::new(),
    }
}
