//! Log sanitization utilities
//!
//! Response bodies can carry contact details, bank accounts and payroll data,
//! and request headers carry bearer tokens. Nothing from either is logged in full.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret kept visible when masking.
const SECRET_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a token or client secret, keeping only a short prefix for correlation.
pub fn mask_secret(secret: &str) -> String {
    if secret.len() <= SECRET_VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    let end = floor_char_boundary(secret, SECRET_VISIBLE_PREFIX);
    format!("{}****", &secret[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        let s = r#"{"Contacts":[]}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn long_body_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_body_truncates_on_char_boundary() {
        let s = "ā".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated"));
    }

    #[test]
    fn secret_keeps_prefix_only() {
        assert_eq!(mask_secret("eyJhbGciOiJSUzI1NiJ9.payload"), "eyJh****");
    }

    #[test]
    fn short_secret_fully_masked() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret(""), "****");
    }
}
