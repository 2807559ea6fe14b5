//! Accounting API requests

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use crate::error::Result;
use crate::headers::HeaderContext;
use crate::http_client::HttpUtils;
use crate::session::XeroApiSession;
use crate::traits::{ApiErrorMapper, ErrorContext};
use crate::types::{
    Contact, ContactQuery, ContactsResponse, Invoice, InvoiceBatch, InvoiceUpdate,
    InvoicesResponse, Organisation, OrganisationsResponse, Quote, QuoteQuery, QuotesResponse,
    TaxRate, TaxRatesResponse,
};
use crate::utils::log_sanitizer::truncate_for_log;

use super::ApiKind;

/// Accounting API borrowed from an authenticated session.
#[derive(Debug, Clone, Copy)]
pub struct AccountingApi<'a> {
    session: &'a XeroApiSession,
}

impl<'a> AccountingApi<'a> {
    pub(crate) fn new(session: &'a XeroApiSession) -> Self {
        Self { session }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.session.config().accounting_url())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        ctx: &HeaderContext,
        err_ctx: ErrorContext,
    ) -> Result<T> {
        let url = self.url(path);
        let mut request = self.session.request(Method::GET, &url, ctx);
        if !query.is_empty() {
            request = request.query(query);
        }
        ApiKind::Accounting.send(request, "GET", &url, err_ctx).await
    }

    /// `GET /Contacts?summaryOnly=true[&page=N]`
    pub async fn list_contacts(
        &self,
        query: &ContactQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Contact>>> {
        let mut params = vec![("summaryOnly", "true".to_string())];
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }

        let resp: ContactsResponse = self
            .get("/Contacts", &params, ctx, ErrorContext::default())
            .await?;
        Ok(resp.contacts)
    }

    /// `GET /Quotes?page=N[&ContactID=..][&QuoteNumber=..]`
    pub async fn list_quotes(
        &self,
        query: &QuoteQuery,
        ctx: &HeaderContext,
    ) -> Result<Option<Vec<Quote>>> {
        let mut params = vec![("page", query.page.to_string())];
        if let Some(contact_id) = &query.contact_id {
            params.push(("ContactID", contact_id.clone()));
        }
        if let Some(quote_number) = &query.quote_number {
            params.push(("QuoteNumber", quote_number.clone()));
        }

        let resp: QuotesResponse = self
            .get("/Quotes", &params, ctx, ErrorContext::default())
            .await?;
        Ok(resp.quotes)
    }

    /// `GET /TaxRates`
    pub async fn list_tax_rates(&self, ctx: &HeaderContext) -> Result<Option<Vec<TaxRate>>> {
        let resp: TaxRatesResponse = self
            .get("/TaxRates", &[], ctx, ErrorContext::default())
            .await?;
        Ok(resp.tax_rates)
    }

    /// `GET /Invoices/{id}`
    pub async fn get_invoice(
        &self,
        invoice_id: &str,
        ctx: &HeaderContext,
    ) -> Result<Option<Invoice>> {
        let path = format!("/Invoices/{}", urlencoding::encode(invoice_id));
        let resp: InvoicesResponse = self
            .get(&path, &[], ctx, ErrorContext::resource(invoice_id))
            .await?;
        Ok(resp.invoices.and_then(|invoices| invoices.into_iter().next()))
    }

    /// `POST /Invoices/{id}` with a batch body.
    ///
    /// Returns the invoices echoed back; an empty vector means the API
    /// accepted the request but reported no result.
    pub async fn update_invoice(
        &self,
        invoice_id: &str,
        batch: &InvoiceBatch<InvoiceUpdate>,
        ctx: &HeaderContext,
    ) -> Result<Vec<Invoice>> {
        let api = ApiKind::Accounting;
        let payload = HttpUtils::to_json_body(batch, api.api_name())?;
        log::debug!("[accounting] Request Body: {}", truncate_for_log(&payload));

        let url = self.url(&format!("/Invoices/{}", urlencoding::encode(invoice_id)));
        let request = self
            .session
            .request(Method::POST, &url, ctx)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);

        let resp: InvoicesResponse = api
            .send_accepting_empty(request, "POST", &url, ErrorContext::resource(invoice_id))
            .await?;
        Ok(resp.invoices.unwrap_or_default())
    }

    /// `GET /Organisation`
    pub async fn get_organisation(&self, ctx: &HeaderContext) -> Result<Option<Organisation>> {
        let resp: OrganisationsResponse = self
            .get("/Organisation", &[], ctx, ErrorContext::default())
            .await?;
        Ok(resp.organisations.and_then(|orgs| orgs.into_iter().next()))
    }
}
