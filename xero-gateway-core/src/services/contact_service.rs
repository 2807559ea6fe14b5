//! Contact listing

use std::sync::Arc;

use xero_gateway_client::{ContactQuery, HeaderContext, SessionProfile};

use crate::error::CoreResult;
use crate::services::{respond, ServiceContext};
use crate::types::{Contact, ResultEnvelope};

/// Contact listing service
pub struct ContactService {
    ctx: Arc<ServiceContext>,
}

impl ContactService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List contacts in summary form, one page at a time.
    pub async fn list_contacts(&self, page: Option<u32>) -> ResultEnvelope<Vec<Contact>> {
        respond("list_contacts", self.fetch(page).await)
    }

    async fn fetch(&self, page: Option<u32>) -> CoreResult<Vec<Contact>> {
        let session = self.ctx.open_session(SessionProfile::Accounting).await?;
        let contacts = session
            .list_contacts(&ContactQuery { page }, &HeaderContext::for_read())
            .await?;
        Ok(contacts.unwrap_or_default())
    }
}
