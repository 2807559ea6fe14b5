//! MCP Server entry point for the Xero gateway
//!
//! Starts the MCP server with stdio transport. Credentials and endpoint
//! overrides come from the environment (see [`config::GatewayConfig`]).

mod config;
mod schemas;
mod server;

use std::process::ExitCode;
use std::sync::Arc;

use config::GatewayConfig;
use rmcp::ServiceExt;
use server::XeroGatewayMcp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xero_gateway_client::XeroClient;
use xero_gateway_core::services::ServiceContext;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Xero Gateway MCP Server");

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Authenticating with {}", config.auth_mode());

    let client = match XeroClient::new(config.into_client_config()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to create Xero client: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sessions are opened per tool call, nothing is authenticated here
    let ctx = Arc::new(ServiceContext::new(Arc::new(client)));

    let mcp_server = XeroGatewayMcp::new(&ctx);

    tracing::info!("MCP server initialized with 6 tools");

    // Start serving via stdio
    tracing::info!("Starting MCP server on stdio transport");
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Wait for the server to complete
    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
