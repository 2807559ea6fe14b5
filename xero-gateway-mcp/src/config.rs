//! Environment-based server configuration.

use anyhow::{bail, Result};
use xero_gateway_client::{ClientConfig, Credentials, ScopeSet};

pub const ENV_CLIENT_ID: &str = "XERO_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "XERO_CLIENT_SECRET";
pub const ENV_BEARER_TOKEN: &str = "XERO_CLIENT_BEARER_TOKEN";
pub const ENV_API_BASE_URL: &str = "XERO_API_BASE_URL";
pub const ENV_IDENTITY_URL: &str = "XERO_IDENTITY_URL";
pub const ENV_SCOPES: &str = "XERO_SCOPES";
pub const ENV_PAYROLL_SCOPES: &str = "XERO_PAYROLL_SCOPES";

/// Settings read at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub credentials: Credentials,
    pub api_base_url: Option<String>,
    pub identity_url: Option<String>,
    pub accounting_scopes: Option<ScopeSet>,
    pub payroll_scopes: Option<ScopeSet>,
}

impl GatewayConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`. Blank values count as unset.
    ///
    /// A bearer token takes precedence over client credentials.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let credentials = if let Some(token) = get(ENV_BEARER_TOKEN) {
            Credentials::BearerToken(token)
        } else {
            match (get(ENV_CLIENT_ID), get(ENV_CLIENT_SECRET)) {
                (Some(client_id), Some(client_secret)) => Credentials::ClientCredentials {
                    client_id,
                    client_secret,
                },
                (client_id, _) => {
                    let missing = if client_id.is_none() {
                        ENV_CLIENT_ID
                    } else {
                        ENV_CLIENT_SECRET
                    };
                    bail!(
                        "{missing} is not set. Set {ENV_CLIENT_ID} and {ENV_CLIENT_SECRET}, \
                         or {ENV_BEARER_TOKEN}"
                    );
                }
            }
        };

        Ok(Self {
            credentials,
            api_base_url: get(ENV_API_BASE_URL),
            identity_url: get(ENV_IDENTITY_URL),
            accounting_scopes: get(ENV_SCOPES).map(|s| ScopeSet::from_delimited(&s)),
            payroll_scopes: get(ENV_PAYROLL_SCOPES).map(|s| ScopeSet::from_delimited(&s)),
        })
    }

    /// Client configuration with every override applied.
    #[must_use]
    pub fn into_client_config(self) -> ClientConfig {
        let mut config = ClientConfig::new(self.credentials);
        if let Some(url) = self.api_base_url {
            config = config.with_api_base_url(url);
        }
        if let Some(url) = self.identity_url {
            config = config.with_identity_url(url);
        }
        if let Some(scopes) = self.accounting_scopes {
            config = config.with_accounting_scopes(scopes);
        }
        if let Some(scopes) = self.payroll_scopes {
            config = config.with_payroll_scopes(scopes);
        }
        config
    }

    /// Short description of the auth mode, safe to log.
    pub fn auth_mode(&self) -> &'static str {
        match self.credentials {
            Credentials::ClientCredentials { .. } => "custom connection",
            Credentials::BearerToken(_) => "bearer token",
        }
    }
}
