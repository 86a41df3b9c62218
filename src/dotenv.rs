//! Dotenv file parsing.
//!
//! Parsing never fails on content: lines that do not look like assignments
//! are skipped, matching how dotenv loaders behave at process start. Only
//! I/O errors surface to the caller.
use anyhow::{Context, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::OnceLock;

/// Ordered key/value pairs from a dotenv file.
///
/// A repeated key keeps the position of its first assignment and the value of
/// its last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(name, _)| name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// JSON object instance handed to the schema validator. Every value is a
    /// string, as the process environment would see it.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (key, value) in &self.entries {
            object.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(object)
    }
}

/// Read and parse a dotenv file. Invalid UTF-8 is decoded lossily.
pub fn read(path: &Path) -> Result<EnvFile> {
    let bytes = std::fs::read(path).with_context(|| format!("read env file {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let env = parse(&text);
    tracing::debug!(path = %path.display(), entries = env.len(), "parsed env file");
    Ok(env)
}

/// One `KEY=VALUE` (or `KEY: VALUE`) assignment; quoted values may span lines.
const ASSIGNMENT_PATTERN: &str = r#"(?m)^\s*(?:export\s+)?([\w.-]+)(?:\s*=\s*?|:\s+?)(\s*'(?:\\'|[^'])*'|\s*"(?:\\"|[^"])*"|\s*`(?:\\`|[^`])*`|[^#\n]+)?\s*(?:#.*)?$"#;

fn assignment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(ASSIGNMENT_PATTERN).expect("regex for dotenv assignments"))
}

pub fn parse(text: &str) -> EnvFile {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut env = EnvFile::default();
    for cap in assignment_regex().captures_iter(&normalized) {
        let Some(key) = cap.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let raw = cap.get(2).map(|m| m.as_str()).unwrap_or_default();
        env.set(key, unquote(raw.trim()));
    }
    env
}

fn unquote(value: &str) -> String {
    let Some(quote) = value.chars().next().filter(|c| matches!(c, '\'' | '"' | '`')) else {
        return value.to_string();
    };
    let stripped = if value.len() >= 2 && value.ends_with(quote) {
        &value[1..value.len() - 1]
    } else {
        value
    };
    if quote == '"' {
        stripped.replace("\\n", "\n").replace("\\r", "\r")
    } else {
        stripped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_regex_is_compiled_once() {
        assert!(std::ptr::eq(assignment_regex(), assignment_regex()));
        assert_eq!(parse("A=1\n"), parse("A=1\n"));
    }

    #[test]
    fn parses_basic_assignments_in_order() {
        let env = parse("PORT=8080\nHOST=localhost\n");
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["PORT", "HOST"]);
        assert_eq!(env.get("PORT"), Some("8080"));
        assert_eq!(env.get("HOST"), Some("localhost"));
    }

    #[test]
    fn skips_comments_blank_and_garbage_lines() {
        let env = parse("# comment\n\nnot an assignment\nNAME=app # trailing\n");
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("NAME"), Some("app"));
    }

    #[test]
    fn strips_quotes_and_expands_double_quoted_newlines() {
        let env = parse("A='single # kept'\nB=\"two\\nlines\"\nC=`tick`\nD='raw\\n'\n");
        assert_eq!(env.get("A"), Some("single # kept"));
        assert_eq!(env.get("B"), Some("two\nlines"));
        assert_eq!(env.get("C"), Some("tick"));
        assert_eq!(env.get("D"), Some("raw\\n"));
    }

    #[test]
    fn accepts_export_prefix_and_colon_separator() {
        let env = parse("export TOKEN=abc\nMODE: prod\n");
        assert_eq!(env.get("TOKEN"), Some("abc"));
        assert_eq!(env.get("MODE"), Some("prod"));
    }

    #[test]
    fn empty_value_is_present_but_empty() {
        let env = parse("EMPTY=\nNEXT=1\n");
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.get("NEXT"), Some("1"));
    }

    #[test]
    fn later_duplicate_overrides_value_but_keeps_position() {
        let env = parse("A=1\nB=2\nA=3\n");
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(env.get("A"), Some("3"));
    }

    #[test]
    fn handles_crlf_line_endings() {
        let env = parse("A=1\r\nB=2\r\n");
        assert_eq!(env.get("A"), Some("1"));
        assert_eq!(env.get("B"), Some("2"));
    }

    #[test]
    fn multiline_double_quoted_value() {
        let env = parse("CERT=\"line1\nline2\"\nAFTER=x\n");
        assert_eq!(env.get("CERT"), Some("line1\nline2"));
        assert_eq!(env.get("AFTER"), Some("x"));
    }

    #[test]
    fn to_json_holds_string_values() {
        let env = parse("PORT=8080\n");
        assert_eq!(env.to_json(), serde_json::json!({ "PORT": "8080" }));
    }
}
