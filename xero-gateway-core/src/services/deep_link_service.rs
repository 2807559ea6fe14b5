//! Deep-link resolution

use std::sync::Arc;

use xero_gateway_client::{HeaderContext, SessionProfile, XeroSession};

use crate::error::{CoreError, CoreResult};
use crate::services::{respond, ServiceContext};
use crate::types::{DeepLinkType, ResultEnvelope};

/// Render a deep link for `item_id` using the short code of `session`'s organisation.
///
/// Fails with [`CoreError::ShortCodeUnavailable`] before rendering when the
/// organisation has no short code.
pub async fn resolve_link(
    session: &dyn XeroSession,
    link_type: DeepLinkType,
    item_id: &str,
) -> CoreResult<String> {
    let short_code = session
        .short_code(&HeaderContext::for_read())
        .await?
        .filter(|code| !code.trim().is_empty())
        .ok_or(CoreError::ShortCodeUnavailable)?;

    Ok(link_type.render(&short_code, item_id))
}

/// Deep-link service
pub struct DeepLinkService {
    ctx: Arc<ServiceContext>,
}

impl DeepLinkService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn get_deep_link(
        &self,
        link_type: DeepLinkType,
        item_id: &str,
    ) -> ResultEnvelope<String> {
        respond("get_deep_link", self.fetch(link_type, item_id).await)
    }

    async fn fetch(&self, link_type: DeepLinkType, item_id: &str) -> CoreResult<String> {
        let session = self.ctx.open_session(SessionProfile::Accounting).await?;
        resolve_link(session.as_ref(), link_type, item_id).await
    }
}
