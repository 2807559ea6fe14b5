//! Utility modules.

/// Log sanitization so response bodies and tokens never reach logs in full.
pub mod log_sanitizer;
