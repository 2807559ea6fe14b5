//! Remote API surfaces reachable from an authenticated session

mod accounting;
pub(crate) mod error;
mod payroll;

pub use accounting::AccountingApi;
pub use payroll::PayrollApi;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ApiErrorMapper, ErrorContext};

/// Remote API surface a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiKind {
    /// `identity.xero.com/connect/token`
    Identity,
    /// `api.xero.com/connections`
    Connections,
    /// `api.xero.com/api.xro/2.0`
    Accounting,
    /// `api.xero.com/payroll.xro/2.0`
    Payroll,
}

impl ApiKind {
    /// Send a request, map a non-2xx response to [`ApiError`](crate::ApiError)
    /// and parse a 2xx body as `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let (status, text) =
            HttpUtils::execute_request(request, self.api_name(), method, url).await?;
        self.check_status(status, &text, ctx)?;
        HttpUtils::parse_json(&text, self.api_name())
    }

    /// Like [`ApiKind::send`], but a blank 2xx body yields `T::default()`.
    ///
    /// Writes can be accepted without an echo; that is not a parse failure.
    pub(crate) async fn send_accepting_empty<T: DeserializeOwned + Default>(
        self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let (status, text) =
            HttpUtils::execute_request(request, self.api_name(), method, url).await?;
        self.check_status(status, &text, ctx)?;
        if text.trim().is_empty() {
            log::warn!(
                "[{}] {method} {url} returned HTTP {status} with no body",
                self.api_name()
            );
            return Ok(T::default());
        }
        HttpUtils::parse_json(&text, self.api_name())
    }

    fn check_status(self, status: u16, text: &str, ctx: ErrorContext) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        let raw = error::parse_error_body(status, text);
        let err = self.map_error(raw, ctx);
        if err.is_expected() {
            log::warn!("{err}");
        } else {
            log::error!("{err}");
        }
        Err(err)
    }
}
