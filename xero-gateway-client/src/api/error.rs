//! Xero error body parsing and status mapping

use serde_json::Value;

use crate::error::ApiError;
use crate::traits::{ApiErrorMapper, ErrorContext, RawApiError};

use super::ApiKind;

/// Extract the most useful code and message from a non-2xx response body.
///
/// Recognised shapes:
/// - identity: `{"error": "invalid_client", "error_description": "..."}`
/// - accounting validation: `{"Type": "ValidationException", "Elements": [{"ValidationErrors": [{"Message": "..."}]}]}`
/// - accounting other: `{"Title": "...", "Detail": "..."}` or `{"Message": "..."}`
/// - payroll NZ: `{"problem": {"title": "...", "detail": "...", "invalidFields": [{"reason": "..."}]}}`
pub(crate) fn parse_error_body(status: u16, body: &str) -> RawApiError {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return RawApiError::new(status, fallback_message(status, body));
    };

    if let Some(code) = str_field(&json, "error") {
        let message = str_field(&json, "error_description").unwrap_or(code);
        return RawApiError::with_code(status, code, message);
    }

    if let Some(message) = first_validation_message(&json) {
        let code = str_field(&json, "Type").unwrap_or("ValidationException");
        return RawApiError::with_code(status, code, message);
    }

    if let Some(problem) = json.get("problem") {
        let reason = problem
            .get("invalidFields")
            .and_then(Value::as_array)
            .and_then(|fields| fields.iter().find_map(|f| str_field(f, "reason")));
        if let Some(message) = reason
            .or_else(|| str_field(problem, "detail"))
            .or_else(|| str_field(problem, "title"))
        {
            return match str_field(problem, "type") {
                Some(code) => RawApiError::with_code(status, code, message),
                None => RawApiError::new(status, message),
            };
        }
    }

    let message = ["Message", "Detail", "detail", "Title", "title"]
        .iter()
        .find_map(|key| str_field(&json, key));
    match (message, str_field(&json, "Type")) {
        (Some(message), Some(code)) => RawApiError::with_code(status, code, message),
        (Some(message), None) => RawApiError::new(status, message),
        (None, _) => RawApiError::new(status, fallback_message(status, body)),
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn first_validation_message(json: &Value) -> Option<&str> {
    json.get("Elements")?
        .as_array()?
        .iter()
        .filter_map(|element| element.get("ValidationErrors")?.as_array())
        .flatten()
        .find_map(|err| str_field(err, "Message"))
}

fn fallback_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        crate::utils::log_sanitizer::truncate_for_log(trimmed)
    }
}

/// Status and code mapping per API surface.
/// Reference: <https://developer.xero.com/documentation/api/accounting/responsecodes>
impl ApiErrorMapper for ApiKind {
    fn api_name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Connections => "connections",
            Self::Accounting => "accounting",
            Self::Payroll => "payroll",
        }
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ApiError {
        let api = self.api_name().to_string();

        // Token endpoint reports OAuth errors as 400 with an `error` code
        if *self == Self::Identity {
            match raw.code.as_deref() {
                Some("invalid_client" | "unauthorized_client" | "invalid_grant") => {
                    return ApiError::InvalidCredentials {
                        api,
                        raw_message: Some(raw.message),
                    };
                }
                Some("invalid_scope") => {
                    return ApiError::PermissionDenied {
                        api,
                        raw_message: Some(raw.message),
                    };
                }
                _ => {}
            }
        }

        match raw.status {
            401 => ApiError::InvalidCredentials {
                api,
                raw_message: Some(raw.message),
            },
            403 => ApiError::PermissionDenied {
                api,
                raw_message: Some(raw.message),
            },
            404 => ApiError::NotFound {
                api,
                resource: context
                    .resource
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },
            400 => ApiError::ValidationFailed {
                api,
                detail: raw.message,
            },
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accounting_validation_message() {
        let body = r#"{
            "ErrorNumber": 10,
            "Type": "ValidationException",
            "Message": "A validation exception occurred",
            "Elements": [
                { "ValidationErrors": [] },
                { "ValidationErrors": [{ "Message": "Account code '999' is not a valid code for this document." }] }
            ]
        }"#;
        let raw = parse_error_body(400, body);
        assert_eq!(raw.code.as_deref(), Some("ValidationException"));
        assert_eq!(
            raw.message,
            "Account code '999' is not a valid code for this document."
        );
    }

    #[test]
    fn falls_back_to_top_level_message() {
        let raw = parse_error_body(400, r#"{"Type":"ValidationException","Message":"bad"}"#);
        assert_eq!(raw.message, "bad");
    }

    #[test]
    fn parses_identity_error() {
        let raw = parse_error_body(
            400,
            r#"{"error":"invalid_client","error_description":"Client authentication failed"}"#,
        );
        assert_eq!(raw.code.as_deref(), Some("invalid_client"));
        assert_eq!(raw.message, "Client authentication failed");
    }

    #[test]
    fn parses_payroll_problem() {
        let raw = parse_error_body(
            400,
            r#"{"problem":{"type":"about:blank","title":"BadRequest","detail":"Validation error occurred.","invalidFields":[{"name":"page","reason":"Page must be positive"}]}}"#,
        );
        assert_eq!(raw.message, "Page must be positive");
    }

    #[test]
    fn non_json_body_kept_as_message() {
        let raw = parse_error_body(500, "Internal Server Error");
        assert_eq!(raw.message, "Internal Server Error");
        assert!(raw.code.is_none());
    }

    #[test]
    fn empty_body_reports_status() {
        assert_eq!(parse_error_body(401, "").message, "HTTP 401");
    }

    #[test]
    fn status_mapping() {
        let api = ApiKind::Accounting;
        assert!(matches!(
            api.map_error(RawApiError::new(401, "x"), ErrorContext::default()),
            ApiError::InvalidCredentials { .. }
        ));
        assert!(matches!(
            api.map_error(RawApiError::new(403, "x"), ErrorContext::default()),
            ApiError::PermissionDenied { .. }
        ));
        assert!(matches!(
            api.map_error(RawApiError::new(404, "x"), ErrorContext::resource("inv-1")),
            ApiError::NotFound { resource, .. } if resource == "inv-1"
        ));
        assert!(matches!(
            api.map_error(RawApiError::new(400, "x"), ErrorContext::default()),
            ApiError::ValidationFailed { .. }
        ));
        assert!(matches!(
            api.map_error(RawApiError::new(500, "x"), ErrorContext::default()),
            ApiError::Unknown { status: Some(500), .. }
        ));
    }

    #[test]
    fn identity_oauth_codes() {
        let api = ApiKind::Identity;
        assert!(matches!(
            api.map_error(
                RawApiError::with_code(400, "invalid_client", "nope"),
                ErrorContext::default()
            ),
            ApiError::InvalidCredentials { api, .. } if api == "identity"
        ));
        assert!(matches!(
            api.map_error(
                RawApiError::with_code(400, "invalid_scope", "nope"),
                ErrorContext::default()
            ),
            ApiError::PermissionDenied { .. }
        ));
    }
}
