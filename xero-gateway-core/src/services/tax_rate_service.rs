//! Tax rate listing

use std::sync::Arc;

use xero_gateway_client::{HeaderContext, SessionProfile};

use crate::error::CoreResult;
use crate::services::{respond, ServiceContext};
use crate::types::{ResultEnvelope, TaxRate};

/// Tax rate listing service
pub struct TaxRateService {
    ctx: Arc<ServiceContext>,
}

impl TaxRateService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn list_tax_rates(&self) -> ResultEnvelope<Vec<TaxRate>> {
        respond("list_tax_rates", self.fetch().await)
    }

    async fn fetch(&self) -> CoreResult<Vec<TaxRate>> {
        let session = self.ctx.open_session(SessionProfile::Accounting).await?;
        let rates = session.list_tax_rates(&HeaderContext::for_read()).await?;
        Ok(rates.unwrap_or_default())
    }
}
