//! Secret-name heuristic and value masking.
use regex::Regex;
use std::sync::OnceLock;

/// Replacement text for redacted values.
pub const MASK: &str = "***";

const SECRET_NAME_PATTERN: &str = r"(?i)pass|secret|key|token|pwd|api";

fn secret_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(SECRET_NAME_PATTERN).expect("regex for secret names"))
}

/// Whether a variable name looks like it holds a credential.
pub fn is_secret(name: &str) -> bool {
    secret_name_regex().is_match(name)
}

/// Redact `value` when `name` looks secret.
pub fn mask<'a>(name: &str, value: &'a str) -> &'a str {
    if is_secret(name) {
        MASK
    } else {
        value
    }
}
