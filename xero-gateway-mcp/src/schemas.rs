//! MCP tool parameter schemas
//!
//! Defines the input parameter structures for all MCP tools.
//! All structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.

use schemars::JsonSchema;
use serde::Deserialize;
use xero_gateway_client::InvoiceLineItem;

/// Parameters for `list_contacts` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListContactsParams {
    /// Page number (1-indexed). Omit to let Xero return its default page.
    #[schemars(description = "Page number (1-indexed). Omit for the first page")]
    pub page: Option<u32>,
}

/// Parameters for `list_quotes` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListQuotesParams {
    /// Page number (1-indexed, default: 1).
    #[schemars(description = "Page number (1-indexed, default: 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Only return quotes for this contact ID")]
    pub contact_id: Option<String>,

    #[schemars(description = "Only return the quote with this quote number")]
    pub quote_number: Option<String>,
}

/// Parameters for `list_tax_rates` tool.
///
/// This tool takes no parameters, but we need an empty struct for the schema.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListTaxRatesParams {}

/// Parameters for `list_payroll_employees` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListPayrollEmployeesParams {
    #[schemars(description = "Page number (1-indexed). Omit for the first page")]
    pub page: Option<u32>,
}

/// One invoice line as supplied by the agent.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LineItemParams {
    #[schemars(description = "Description of the line item")]
    pub description: String,

    #[schemars(description = "Quantity")]
    pub quantity: f64,

    #[schemars(description = "Price per unit")]
    pub unit_amount: f64,

    #[schemars(description = "Account code the line is posted to")]
    pub account_code: String,

    #[schemars(description = "Tax type, as returned by list_tax_rates")]
    pub tax_type: String,
}

impl From<LineItemParams> for InvoiceLineItem {
    fn from(item: LineItemParams) -> Self {
        Self {
            description: item.description,
            quantity: item.quantity,
            unit_amount: item.unit_amount,
            account_code: item.account_code,
            tax_type: item.tax_type,
        }
    }
}

/// Parameters for `update_invoice` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateInvoiceParams {
    #[schemars(description = "ID of the DRAFT invoice to update")]
    pub invoice_id: String,

    /// Replaces every existing line item when present.
    #[schemars(
        description = "New line items. When given, they replace all existing line items on the invoice"
    )]
    pub line_items: Option<Vec<LineItemParams>>,

    #[schemars(description = "New invoice reference")]
    pub reference: Option<String>,

    #[schemars(description = "New due date (YYYY-MM-DD)")]
    pub due_date: Option<String>,
}

/// Parameters for `get_deep_link` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDeepLinkParams {
    #[schemars(description = "Entity type: CONTACT, CREDIT_NOTE, INVOICE or QUOTE")]
    pub link_type: String,

    #[schemars(description = "ID of the entity to link to")]
    pub item_id: String,
}
