//! MCP Server implementation for the Xero gateway.
//!
//! Exposes 6 tools for AI agents. Every tool answers with the handler's
//! result envelope serialized as pretty JSON; error envelopes also set the
//! MCP `is_error` flag. Only malformed tool input becomes a protocol error.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::sync::Arc;

use xero_gateway_core::services::{
    ContactService, DeepLinkService, InvoiceService, PayrollService, QuoteService,
    ServiceContext, TaxRateService,
};
use xero_gateway_core::types::{DeepLinkType, ResultEnvelope, UpdateInvoiceRequest};

use crate::schemas::{
    GetDeepLinkParams, ListContactsParams, ListPayrollEmployeesParams, ListQuotesParams,
    ListTaxRatesParams, UpdateInvoiceParams,
};

/// Sanitize error messages to prevent sensitive information leakage.
///
/// Logs the full error to stderr but returns a generic message to the client.
fn sanitize_internal_error(error: impl std::fmt::Display, context: &str) -> McpError {
    tracing::error!("{context} error: {error}");
    McpError::internal_error(
        format!("{context} failed - check server logs for details"),
        None,
    )
}

/// Render an envelope as tool output.
fn envelope_result<T: Serialize>(
    envelope: &ResultEnvelope<T>,
    tool_name: &str,
) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(envelope)
        .map_err(|e| sanitize_internal_error(e, &format!("Serialize {tool_name} result")))?;

    if envelope.is_error() {
        Ok(CallToolResult::error(vec![Content::text(json)]))
    } else {
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(McpError::invalid_params(format!("{field} must not be empty"), None));
    }
    Ok(())
}

/// MCP Server for the Xero gateway.
///
/// Provides AI agents with access to Xero accounting and payroll data
/// through the Model Context Protocol.
#[derive(Clone)]
pub struct XeroGatewayMcp {
    contact_service: Arc<ContactService>,
    quote_service: Arc<QuoteService>,
    tax_rate_service: Arc<TaxRateService>,
    payroll_service: Arc<PayrollService>,
    invoice_service: Arc<InvoiceService>,
    deep_link_service: Arc<DeepLinkService>,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl XeroGatewayMcp {
    /// Create a new MCP server instance.
    #[must_use]
    pub fn new(ctx: &Arc<ServiceContext>) -> Self {
        Self {
            contact_service: Arc::new(ContactService::new(Arc::clone(ctx))),
            quote_service: Arc::new(QuoteService::new(Arc::clone(ctx))),
            tax_rate_service: Arc::new(TaxRateService::new(Arc::clone(ctx))),
            payroll_service: Arc::new(PayrollService::new(Arc::clone(ctx))),
            invoice_service: Arc::new(InvoiceService::new(Arc::clone(ctx))),
            deep_link_service: Arc::new(DeepLinkService::new(Arc::clone(ctx))),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl XeroGatewayMcp {
    /// List contacts.
    #[tool(description = "List contacts in the connected Xero organisation (summary fields only)")]
    async fn list_contacts(
        &self,
        Parameters(params): Parameters<ListContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = self.contact_service.list_contacts(params.page).await;
        envelope_result(&envelope, "list_contacts")
    }

    /// List quotes.
    #[tool(
        description = "List quotes in the connected Xero organisation, optionally filtered by contact ID or quote number"
    )]
    async fn list_quotes(
        &self,
        Parameters(params): Parameters<ListQuotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = self
            .quote_service
            .list_quotes(params.page, params.contact_id, params.quote_number)
            .await;
        envelope_result(&envelope, "list_quotes")
    }

    /// List tax rates.
    #[tool(description = "List the tax rates configured in the connected Xero organisation")]
    async fn list_tax_rates(
        &self,
        _params: Parameters<ListTaxRatesParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = self.tax_rate_service.list_tax_rates().await;
        envelope_result(&envelope, "list_tax_rates")
    }

    /// List payroll employees.
    #[tool(description = "List payroll employees in the connected Xero organisation (NZ payroll)")]
    async fn list_payroll_employees(
        &self,
        Parameters(params): Parameters<ListPayrollEmployeesParams>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = self.payroll_service.list_employees(params.page).await;
        envelope_result(&envelope, "list_payroll_employees")
    }

    /// Update a draft invoice.
    #[tool(
        description = "Update a DRAFT invoice (line items, reference, due date). Invoices in any other status are refused. Returns the updated invoice and a link to it in Xero"
    )]
    async fn update_invoice(
        &self,
        Parameters(params): Parameters<UpdateInvoiceParams>,
    ) -> Result<CallToolResult, McpError> {
        require_non_empty(&params.invoice_id, "invoice_id")?;

        let request = UpdateInvoiceRequest {
            invoice_id: params.invoice_id,
            line_items: params
                .line_items
                .map(|items| items.into_iter().map(Into::into).collect()),
            reference: params.reference,
            due_date: params.due_date,
        };

        let envelope = self.invoice_service.update_invoice_with_link(request).await;
        envelope_result(&envelope, "update_invoice")
    }

    /// Build a deep link.
    #[tool(
        description = "Build a link that opens a contact, credit note, invoice or quote in the Xero web app"
    )]
    async fn get_deep_link(
        &self,
        Parameters(params): Parameters<GetDeepLinkParams>,
    ) -> Result<CallToolResult, McpError> {
        let link_type = params
            .link_type
            .parse::<DeepLinkType>()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        require_non_empty(&params.item_id, "item_id")?;

        let envelope = self
            .deep_link_service
            .get_deep_link(link_type, &params.item_id)
            .await;
        envelope_result(&envelope, "get_deep_link")
    }
}

#[tool_handler]
impl ServerHandler for XeroGatewayMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Xero Gateway MCP Server - Read and edit data in a connected Xero organisation. \
                 Use list_contacts, list_quotes and list_tax_rates for accounting data, \
                 list_payroll_employees for payroll. \
                 update_invoice only edits DRAFT invoices. \
                 get_deep_link builds a link that opens an entity in the Xero web app. \
                 Every tool answers with {result, isError, error, errorKind}."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
