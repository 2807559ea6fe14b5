//! Type definitions

mod envelope;
mod invoice;

pub use envelope::ResultEnvelope;
pub use invoice::{UpdateInvoiceRequest, UpdatedInvoice};

// Re-export client types handlers accept and return
pub use xero_gateway_client::{
    Contact, DeepLinkType, Employee, Invoice, InvoiceLineItem, InvoiceStatus, Quote, TaxRate,
};
