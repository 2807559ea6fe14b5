//! Client configuration: credentials, endpoints and scope overrides.

use std::fmt;
use std::time::Duration;

use crate::scopes::{ScopeSet, SessionProfile};
use crate::utils::log_sanitizer::mask_secret;

/// Production API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.xero.com";
/// Production identity host (token endpoint).
pub const DEFAULT_IDENTITY_URL: &str = "https://identity.xero.com";

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How a session obtains its access token.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Custom connection: OAuth2 client-credentials exchange per session.
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
    /// A pre-issued access token used as-is.
    BearerToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"****")
                .finish(),
            Self::BearerToken(token) => f
                .debug_tuple("BearerToken")
                .field(&mask_secret(token))
                .finish(),
        }
    }
}

/// Everything a [`XeroClient`](crate::XeroClient) needs to open sessions.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    /// Host serving `/connections`, `/api.xro/2.0` and `/payroll.xro/2.0`.
    pub api_base_url: String,
    /// Host serving `/connect/token`.
    pub identity_url: String,
    pub accounting_scopes: ScopeSet,
    pub payroll_scopes: ScopeSet,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            accounting_scopes: ScopeSet::accounting(),
            payroll_scopes: ScopeSet::payroll(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_trailing_slash(url.into());
        self
    }

    #[must_use]
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = trim_trailing_slash(url.into());
        self
    }

    #[must_use]
    pub fn with_accounting_scopes(mut self, scopes: ScopeSet) -> Self {
        self.accounting_scopes = scopes;
        self
    }

    #[must_use]
    pub fn with_payroll_scopes(mut self, scopes: ScopeSet) -> Self {
        self.payroll_scopes = scopes;
        self
    }

    /// Configured scope set for a handler profile.
    #[must_use]
    pub fn scopes_for(&self, profile: SessionProfile) -> ScopeSet {
        match profile {
            SessionProfile::Accounting => self.accounting_scopes.clone(),
            SessionProfile::Payroll => self.payroll_scopes.clone(),
        }
    }

    pub(crate) fn token_url(&self) -> String {
        format!("{}/connect/token", self.identity_url)
    }

    pub(crate) fn connections_url(&self) -> String {
        format!("{}/connections", self.api_base_url)
    }

    pub(crate) fn accounting_url(&self) -> String {
        format!("{}/api.xro/2.0", self.api_base_url)
    }

    pub(crate) fn payroll_url(&self) -> String {
        format!("{}/payroll.xro/2.0", self.api_base_url)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
