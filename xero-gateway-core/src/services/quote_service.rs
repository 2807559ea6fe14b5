//! Quote listing

use std::sync::Arc;

use xero_gateway_client::{HeaderContext, QuoteQuery, SessionProfile};

use crate::error::CoreResult;
use crate::services::{respond, ServiceContext};
use crate::types::{Quote, ResultEnvelope};

/// Quote listing service
pub struct QuoteService {
    ctx: Arc<ServiceContext>,
}

impl QuoteService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List quotes, optionally filtered by contact and quote number.
    ///
    /// `page` defaults to 1.
    pub async fn list_quotes(
        &self,
        page: Option<u32>,
        contact_id: Option<String>,
        quote_number: Option<String>,
    ) -> ResultEnvelope<Vec<Quote>> {
        let query = QuoteQuery {
            page: page.unwrap_or(1),
            contact_id,
            quote_number,
        };
        respond("list_quotes", self.fetch(&query).await)
    }

    async fn fetch(&self, query: &QuoteQuery) -> CoreResult<Vec<Quote>> {
        let session = self.ctx.open_session(SessionProfile::Accounting).await?;
        let quotes = session
            .list_quotes(query, &HeaderContext::for_read())
            .await?;
        Ok(quotes.unwrap_or_default())
    }
}
