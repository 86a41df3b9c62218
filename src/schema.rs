//! JSON Schema loading and violation collection.
//!
//! Validation itself is delegated to the `jsonschema` crate. This module only
//! turns its errors into per-field `Violation`s that the report builder can
//! merge.
use anyhow::{anyhow, Context, Result};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use serde_json::Value;
use std::path::Path;

/// Field label for errors that belong to the env object as a whole.
pub const ROOT_FIELD: &str = "(root)";

/// A parsed schema document and the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub name: String,
    pub value: Value,
}

/// A single schema violation attributed to one env field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub instance_path: String,
    pub schema_path: String,
    pub keyword: String,
    /// Constraint value found at `schema_path`, rendered as text.
    pub expected: String,
    pub message: String,
}

impl Violation {
    pub fn is_required(&self) -> bool {
        self.keyword == "required"
    }
}

/// Read and parse a schema file.
pub fn load(path: &Path) -> Result<LoadedSchema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read schema {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("parse schema JSON {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(LoadedSchema::from_value(&name, value))
}

impl LoadedSchema {
    pub fn from_value(name: &str, value: Value) -> Self {
        LoadedSchema {
            name: name.to_string(),
            value,
        }
    }

    /// Top-level `required` names, in schema order. Non-string entries are
    /// ignored.
    pub fn required(&self) -> Vec<&str> {
        self.value
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn compile(&self) -> Result<CompiledSchema<'_>> {
        let validator = jsonschema::validator_for(&self.value)
            .map_err(|err| anyhow!("compile schema {}: {err}", self.name))?;
        Ok(CompiledSchema {
            schema: self,
            validator,
        })
    }
}

pub struct CompiledSchema<'a> {
    schema: &'a LoadedSchema,
    validator: Validator,
}

impl CompiledSchema<'_> {
    /// Collect every violation of `instance`, in validator order.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        let mut out = Vec::new();
        for error in self.validator.iter_errors(instance) {
            self.push_violations(&error, &mut out);
        }
        // Messages quote env values, so only locations are logged.
        for violation in &out {
            tracing::debug!(
                field = %violation.field,
                keyword = %violation.keyword,
                instance_path = %violation.instance_path,
                schema_path = %violation.schema_path,
                "schema violation"
            );
        }
        tracing::debug!(
            schema = %self.schema.name,
            violations = out.len(),
            "schema validation finished"
        );
        out
    }

    fn push_violations(&self, error: &ValidationError<'_>, out: &mut Vec<Violation>) {
        let instance_path = error.instance_path.to_string();
        let schema_path = error.schema_path.to_string();
        let keyword = last_segment(&schema_path).unwrap_or_default();
        let expected = self
            .schema
            .value
            .pointer(&schema_path)
            .map(render_value)
            .unwrap_or_else(|| keyword.clone());
        let message = error.to_string();

        let base = |field: String| Violation {
            field,
            instance_path: instance_path.clone(),
            schema_path: schema_path.clone(),
            keyword: keyword.clone(),
            expected: expected.clone(),
            message: message.clone(),
        };

        match &error.kind {
            ValidationErrorKind::Required { property } => {
                let field = match property {
                    Value::String(name) => name.clone(),
                    other => other.to_string(),
                };
                out.push(base(field));
            }
            ValidationErrorKind::AdditionalProperties { unexpected } if !unexpected.is_empty() => {
                for name in unexpected {
                    let mut violation = base(name.clone());
                    violation.message = format!("Additional property {name:?} is not allowed");
                    out.push(violation);
                }
            }
            _ => {
                let field = first_segment(&instance_path).unwrap_or_else(|| ROOT_FIELD.to_string());
                out.push(base(field));
            }
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn first_segment(pointer: &str) -> Option<String> {
    pointer
        .strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .filter(|segment| !segment.is_empty())
        .map(unescape_pointer_segment)
}

fn last_segment(pointer: &str) -> Option<String> {
    pointer
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(unescape_pointer_segment)
}

fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
