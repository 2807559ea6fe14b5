//! Shared test helpers: a mock Xero backend and session setup

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xero_gateway_client::{
    ClientConfig, Credentials, ScopeSet, XeroApiSession, XeroClient,
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
/// `base64("client-id:client-secret")`
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";
pub const ACCESS_TOKEN: &str = "tok-abc-123456";
pub const TENANT_ID: &str = "tenant-1";

/// Assert a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Mock server plus a client pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub client: XeroClient,
}

impl TestContext {
    /// Client-credentials client against a fresh mock server.
    pub async fn start() -> Self {
        Self::with_credentials(Credentials::ClientCredentials {
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
        })
        .await
    }

    pub async fn with_credentials(credentials: Credentials) -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::new(credentials)
            .with_api_base_url(server.uri())
            .with_identity_url(server.uri());
        let client = XeroClient::new(config).unwrap();
        Self { server, client }
    }

    /// Mount a token endpoint and a single-tenant connections endpoint.
    pub async fn mount_auth(&self) {
        mount_token(&self.server).await;
        mount_connections(&self.server, &[TENANT_ID]).await;
    }

    /// Authenticate a session for `scopes` (accounting when `None`).
    pub async fn session(&self, scopes: Option<ScopeSet>) -> XeroApiSession {
        self.mount_auth().await;
        self.client
            .create_session(scopes)
            .authenticate()
            .await
            .unwrap()
    }
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 1800,
            "token_type": "Bearer",
            "scope": "accounting.contacts"
        })))
        .mount(server)
        .await;
}

pub async fn mount_connections(server: &MockServer, tenants: &[&str]) {
    let body: Vec<_> = tenants
        .iter()
        .map(|id| {
            json!({
                "id": format!("conn-{id}"),
                "tenantId": id,
                "tenantType": "ORGANISATION",
                "tenantName": "Demo Company (NZ)"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
