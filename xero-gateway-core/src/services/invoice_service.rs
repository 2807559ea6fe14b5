//! Invoice update with the DRAFT-only guard

use std::sync::Arc;

use xero_gateway_client::{ApiError, HeaderContext, InvoiceBatch, SessionProfile, XeroSession};

use crate::error::{CoreError, CoreResult};
use crate::services::{resolve_link, respond, ServiceContext};
use crate::types::{DeepLinkType, Invoice, ResultEnvelope, UpdateInvoiceRequest, UpdatedInvoice};

/// Invoice update service
///
/// Two concurrent updates of the same invoice can both pass the guard; the
/// read and the write are not atomic remotely.
pub struct InvoiceService {
    ctx: Arc<ServiceContext>,
}

impl InvoiceService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Update a DRAFT invoice.
    pub async fn update_invoice(&self, request: UpdateInvoiceRequest) -> ResultEnvelope<Invoice> {
        respond("update_invoice", self.update(&request).await)
    }

    /// Update a DRAFT invoice and attach a deep link to it.
    ///
    /// The link is resolved on the same session; failing to resolve it does not
    /// fail the update.
    pub async fn update_invoice_with_link(
        &self,
        request: UpdateInvoiceRequest,
    ) -> ResultEnvelope<UpdatedInvoice> {
        respond("update_invoice", self.update_with_link(&request).await)
    }

    async fn update(&self, request: &UpdateInvoiceRequest) -> CoreResult<Invoice> {
        let session = self.ctx.open_session(SessionProfile::Accounting).await?;
        apply_update(session.as_ref(), request).await
    }

    async fn update_with_link(&self, request: &UpdateInvoiceRequest) -> CoreResult<UpdatedInvoice> {
        let session = self.ctx.open_session(SessionProfile::Accounting).await?;
        let invoice = apply_update(session.as_ref(), request).await?;

        let link_id = invoice
            .invoice_id
            .clone()
            .unwrap_or_else(|| request.invoice_id.clone());
        let deep_link = match resolve_link(session.as_ref(), DeepLinkType::Invoice, &link_id).await
        {
            Ok(link) => Some(link),
            Err(e) => {
                log::warn!("Invoice {link_id} updated, deep link unavailable: {e}");
                None
            }
        };

        Ok(UpdatedInvoice { invoice, deep_link })
    }
}

/// Read, guard, write. No write is issued unless the invoice is a DRAFT.
async fn apply_update(
    session: &dyn XeroSession,
    request: &UpdateInvoiceRequest,
) -> CoreResult<Invoice> {
    let invoice_id = request.invoice_id.as_str();
    let read_ctx = HeaderContext::for_read();

    let existing = match session.get_invoice(invoice_id, &read_ctx).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) | Err(ApiError::NotFound { .. }) => {
            return Err(CoreError::InvoiceNotFound(invoice_id.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    if !existing.is_draft() {
        return Err(CoreError::InvoiceNotDraft {
            invoice_id: invoice_id.to_string(),
            status: existing
                .status
                .unwrap_or_else(|| "UNKNOWN".to_string()),
        });
    }

    let patch = request.to_patch();
    if patch.is_empty() {
        log::debug!("Invoice {invoice_id} update carries no changes");
    }
    let batch = InvoiceBatch::single(patch);
    let write_ctx = HeaderContext::for_write().with_correlation_id(read_ctx.correlation_id());
    let updated = session.update_invoice(invoice_id, &batch, &write_ctx).await?;

    updated
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::InvoiceUpdateFailed {
            invoice_id: invoice_id.to_string(),
        })
}
