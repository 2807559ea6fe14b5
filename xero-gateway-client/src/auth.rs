//! Token acquisition and tenant resolution

use chrono::{DateTime, Duration, Utc};
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::api::ApiKind;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::headers::HeaderContext;
use crate::scopes::ScopeSet;
use crate::traits::ErrorContext;
use crate::types::{Connection, TokenResponse};

/// An access token and, when the issuer reported one, its expiry.
#[derive(Clone)]
pub(crate) struct AccessToken {
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &crate::utils::log_sanitizer::mask_secret(&self.value))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    pub fn bearer(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }
}

/// OAuth2 client-credentials exchange against the identity token endpoint.
///
/// An empty scope set omits the `scope` parameter so the connection's
/// configured scopes apply.
pub(crate) async fn exchange_client_credentials(
    http: &Client,
    config: &ClientConfig,
    client_id: &str,
    client_secret: &str,
    scopes: &ScopeSet,
    ctx: &HeaderContext,
) -> Result<AccessToken> {
    let url = config.token_url();
    let mut form = vec![("grant_type", "client_credentials".to_string())];
    if !scopes.is_empty() {
        form.push(("scope", scopes.to_scope_param()));
    }

    let request = ctx.apply(
        http.post(&url)
            .basic_auth(client_id, Some(client_secret))
            .header(ACCEPT, "application/json")
            .form(&form),
    );

    let token: TokenResponse = ApiKind::Identity
        .send(request, "POST", &url, ErrorContext::default())
        .await?;

    if token.access_token.is_empty() {
        return Err(ApiError::InvalidCredentials {
            api: "identity".to_string(),
            raw_message: Some("token endpoint returned an empty access token".to_string()),
        });
    }

    let expires_at = token
        .expires_in
        .map(|secs| Utc::now() + Duration::seconds(secs));
    log::debug!(
        "[identity] Token issued for scopes '{}', expires at {expires_at:?}",
        token.scope.as_deref().unwrap_or_default()
    );

    Ok(AccessToken {
        value: token.access_token,
        expires_at,
    })
}

/// Resolve the tenant a token is connected to: the first entry of `/connections`.
pub(crate) async fn resolve_tenant(
    http: &Client,
    config: &ClientConfig,
    token: &AccessToken,
    ctx: &HeaderContext,
) -> Result<String> {
    let url = config.connections_url();
    let request = ctx.apply(
        http.get(&url)
            .bearer_auth(&token.value)
            .header(ACCEPT, "application/json"),
    );

    let connections: Vec<Connection> = ApiKind::Connections
        .send(request, "GET", &url, ErrorContext::default())
        .await?;

    let Some(first) = connections.into_iter().next() else {
        return Err(ApiError::TenantUnavailable {
            detail: "the access token is not connected to any organisation".to_string(),
        });
    };

    log::debug!(
        "[connections] Using tenant {} ({}, {})",
        first.tenant_id,
        first.tenant_name.as_deref().unwrap_or("unnamed"),
        first.tenant_type.as_deref().unwrap_or("unknown type")
    );
    Ok(first.tenant_id)
}
