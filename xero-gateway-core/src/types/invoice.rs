//! Invoice update request and response types

use serde::{Deserialize, Serialize};
use xero_gateway_client::{Invoice, InvoiceLineItem, InvoiceUpdate};

/// Edit to a DRAFT invoice. `None` fields are left unchanged remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub invoice_id: String,
    pub line_items: Option<Vec<InvoiceLineItem>>,
    pub reference: Option<String>,
    pub due_date: Option<String>,
}

impl UpdateInvoiceRequest {
    /// Patch body sent in the single-element write batch.
    pub fn to_patch(&self) -> InvoiceUpdate {
        InvoiceUpdate {
            line_items: self.line_items.clone(),
            reference: self.reference.clone(),
            due_date: self.due_date.clone(),
        }
    }
}

/// Updated invoice plus a link to it in the web application, when one could be built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedInvoice {
    pub invoice: Invoice,
    pub deep_link: Option<String>,
}
