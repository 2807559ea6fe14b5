//! Remote entity and request types.
//!
//! Entities are passed through unmodified: each struct names only the fields
//! the gateway reads and keeps every other wire field in `extra`, so
//! serializing an entity back out reproduces what the API sent.
//!
//! The accounting API uses `PascalCase` keys, payroll NZ uses `camelCase`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Accounting entities ============

/// A contact (customer or supplier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(rename = "ContactID", default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sales quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quote {
    #[serde(rename = "QuoteID", default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tax rate configured for the organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxRate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Invoice lifecycle status. Only [`InvoiceStatus::Draft`] may be edited through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Submitted,
    Deleted,
    Authorised,
    Paid,
    Voided,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Deleted => "DELETED",
            Self::Authorised => "AUTHORISED",
            Self::Paid => "PAID",
            Self::Voided => "VOIDED",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "SUBMITTED" => Ok(Self::Submitted),
            "DELETED" => Ok(Self::Deleted),
            "AUTHORISED" => Ok(Self::Authorised),
            "PAID" => Ok(Self::Paid),
            "VOIDED" => Ok(Self::Voided),
            other => Err(format!("unknown invoice status: {other}")),
        }
    }
}

/// An invoice (sales or bill).
///
/// `status` keeps the wire string so statuses this crate does not know
/// still pass through; [`Invoice::known_status`] gives the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    #[serde(rename = "InvoiceID", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invoice {
    /// Typed status; `None` when absent or not a known status.
    pub fn known_status(&self) -> Option<InvoiceStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn is_draft(&self) -> bool {
        self.known_status() == Some(InvoiceStatus::Draft)
    }
}

/// Organisation details; only the short code is used, for deep links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Organisation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============ Payroll entities ============

/// A payroll (NZ) employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "employeeID", default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============ Requests ============

/// Filters for listing contacts. Contacts are always fetched in summary form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    pub page: Option<u32>,
}

/// Filters for listing quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteQuery {
    /// 1-indexed page.
    pub page: u32,
    pub contact_id: Option<String>,
    /// Free-text quote number filter.
    pub quote_number: Option<String>,
}

impl Default for QuoteQuery {
    fn default() -> Self {
        Self {
            page: 1,
            contact_id: None,
            quote_number: None,
        }
    }
}

/// Filters for listing payroll employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
}

/// A line item supplied when editing an invoice. Validation is left to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_amount: f64,
    pub account_code: String,
    pub tax_type: String,
}

/// Partial invoice patch.
///
/// `None` means "leave the remote value alone" and is omitted from the JSON;
/// `Some(String::new())` is sent and clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<InvoiceLineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl InvoiceUpdate {
    /// Whether the patch would change anything.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_none() && self.reference.is_none() && self.due_date.is_none()
    }
}

/// Batch envelope used for invoice writes: `{"Invoices": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceBatch<T> {
    pub invoices: Vec<T>,
}

impl<T> InvoiceBatch<T> {
    /// A batch holding exactly one element.
    pub fn single(item: T) -> Self {
        Self {
            invoices: vec![item],
        }
    }
}

// ============ Wire wrappers ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ContactsResponse {
    #[serde(default)]
    pub contacts: Option<Vec<Contact>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct QuotesResponse {
    #[serde(default)]
    pub quotes: Option<Vec<Quote>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TaxRatesResponse {
    #[serde(default)]
    pub tax_rates: Option<Vec<TaxRate>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InvoicesResponse {
    #[serde(default)]
    pub invoices: Option<Vec<Invoice>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct OrganisationsResponse {
    #[serde(default)]
    pub organisations: Option<Vec<Organisation>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmployeesResponse {
    #[serde(default)]
    pub employees: Option<Vec<Employee>>,
}

/// One entry of `GET /connections`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection {
    pub tenant_id: String,
    #[serde(default)]
    pub tenant_type: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
}

/// Token endpoint success body.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}
