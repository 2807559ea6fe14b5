//! Shared HTTP execution helpers
//!
//! Each API surface builds its own `RequestBuilder` (auth, tenant and context
//! headers differ per surface); this module owns the common part: sending,
//! logging, mapping transport failures and reading the body.
//!
//! Requests are sent exactly once. Transient failures surface as
//! [`ApiError::NetworkError`], [`ApiError::Timeout`] or [`ApiError::RateLimited`].

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP helper functions
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return the status code with the response text.
    ///
    /// # Arguments
    /// * `request_builder` - fully configured request (URL, headers, body)
    /// * `api_name` - API surface name, used in logs and errors
    /// * `method_name` - HTTP method, for logs
    /// * `url` - request URL, for logs
    ///
    /// HTTP 429 and 502..=504 are mapped here; every other status is returned
    /// to the caller for surface-specific mapping.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        api_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("[{api_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    api: api_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    api: api_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{api_name}] Response Status: {status_code}");

        // Read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{api_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ApiError::RateLimited {
                api: api_name.to_string(),
                retry_after,
                raw_message: (!body.is_empty()).then(|| truncate_for_log(&body)),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{api_name}] Server error (HTTP {status_code})");
            return Err(ApiError::NetworkError {
                api: api_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                api: api_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{api_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, api_name: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{api_name}] JSON parse failed: {e}");
            log::error!(
                "[{api_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ApiError::ParseError {
                api: api_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Serialize a request body, mapping failure to [`ApiError::SerializationError`].
    pub fn to_json_body<B>(body: &B, api_name: &str) -> Result<String, ApiError>
    where
        B: serde::Serialize + ?Sized,
    {
        serde_json::to_string(body).map_err(|e| ApiError::SerializationError {
            api: api_name.to_string(),
            detail: e.to_string(),
        })
    }
}
