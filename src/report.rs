//! Report assembly.
//!
//! Rows come from three sources, merged in this order with at most one row
//! per field:
//! 1. schema violations (validator order),
//! 2. top-level `required` names that are absent or empty,
//! 3. secret-looking keys, when the secret scan is enabled (file order).
use crate::dotenv::EnvFile;
use crate::schema::{LoadedSchema, Violation};
use crate::secrets::{self, MASK};
use serde::Serialize;
use serde_json::Value;

pub const MISSING: &str = "missing";
pub const NOT_AVAILABLE: &str = "N/A";
pub const MISSING_REQUIRED_ERROR: &str = "Missing required env var";
pub const SECRET_DETECTED_ERROR: &str = "Potential secret detected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Fail,
    SecretFlag,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Fail => "fail",
            Status::SecretFlag => "secret-flag",
        }
    }

    /// Glyph used by the console table and the HTML report.
    pub fn glyph(self) -> &'static str {
        match self {
            Status::Fail => "❌",
            Status::SecretFlag => "🔒",
        }
    }
}

/// One offending field. Passing fields never produce a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub field: String,
    pub expected: String,
    pub received: String,
    pub masked: String,
    pub error: String,
    pub status: Status,
}

impl ValidationResult {
    fn missing_required(field: &str) -> Self {
        ValidationResult {
            field: field.to_string(),
            expected: "required".to_string(),
            received: MISSING.to_string(),
            masked: NOT_AVAILABLE.to_string(),
            error: MISSING_REQUIRED_ERROR.to_string(),
            status: Status::Fail,
        }
    }

    fn secret(field: &str) -> Self {
        ValidationResult {
            field: field.to_string(),
            expected: "secret".to_string(),
            received: MASK.to_string(),
            masked: MASK.to_string(),
            error: SECRET_DETECTED_ERROR.to_string(),
            status: Status::SecretFlag,
        }
    }

    fn from_violation(violation: &Violation, env: &EnvFile) -> Self {
        let value = env.get(&violation.field);
        let (received, masked) = match value {
            Some(value) => {
                let shown = secrets::mask(&violation.field, value).to_string();
                (shown.clone(), shown)
            }
            None => (MISSING.to_string(), NOT_AVAILABLE.to_string()),
        };
        ValidationResult {
            field: violation.field.clone(),
            expected: violation.expected.clone(),
            received,
            masked,
            error: error_message(violation, env),
            status: Status::Fail,
        }
    }
}

/// Validator message for `violation` with every secret-named value replaced
/// by the mask. Messages quote the offending instance, which for errors on
/// the root object is the whole env file.
fn error_message(violation: &Violation, env: &EnvFile) -> String {
    let mut message = violation.message.clone();
    for key in env.keys().filter(|key| secrets::is_secret(key)) {
        if let Some(value) = env.get(key).filter(|value| !value.is_empty()) {
            message = redact(&message, value);
        }
    }
    message
}

fn redact(message: &str, value: &str) -> String {
    let quoted = Value::String(value.to_string()).to_string();
    let masked = Value::String(MASK.to_string()).to_string();
    message.replace(&quoted, &masked).replace(value, MASK)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub results: Vec<ValidationResult>,
    /// False when the validator rejected the env file.
    pub schema_valid: bool,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn fail_count(&self) -> usize {
        self.count(Status::Fail)
    }

    pub fn secret_count(&self) -> usize {
        self.count(Status::SecretFlag)
    }

    fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    fn find_mut(&mut self, field: &str) -> Option<&mut ValidationResult> {
        self.results.iter_mut().find(|r| r.field == field)
    }

    fn contains(&self, field: &str) -> bool {
        self.results.iter().any(|r| r.field == field)
    }
}

/// Merge violations, missing required names, and secret flags into a report.
pub fn build(
    schema: &LoadedSchema,
    env: &EnvFile,
    violations: &[Violation],
    scan_secrets: bool,
) -> Report {
    let mut report = Report {
        results: Vec::new(),
        schema_valid: violations.is_empty(),
    };

    for violation in violations {
        if let Some(existing) = report.find_mut(&violation.field) {
            // Required rows are already canonical; extra messages add nothing.
            if existing.error != MISSING_REQUIRED_ERROR && !violation.is_required() {
                existing.error.push_str("; ");
                existing.error.push_str(&error_message(violation, env));
            }
            continue;
        }
        let row = if violation.is_required() {
            ValidationResult::missing_required(&violation.field)
        } else {
            ValidationResult::from_violation(violation, env)
        };
        report.results.push(row);
    }

    for name in schema.required() {
        let present = env.get(name).is_some_and(|value| !value.is_empty());
        if !present && !report.contains(name) {
            report.results.push(ValidationResult::missing_required(name));
        }
    }

    if scan_secrets {
        for key in env.keys() {
            if secrets::is_secret(key) && !report.contains(key) {
                report.results.push(ValidationResult::secret(key));
            }
        }
    }

    tracing::info!(
        rows = report.len(),
        failures = report.fail_count(),
        secrets = report.secret_count(),
        "report assembled"
    );
    report
}
