use crate::report::{Report, ValidationResult};

const HEADER: [&str; 6] = ["field", "expected", "received", "masked", "error", "status"];

/// CSV with a header row; every cell is quoted and rows are `\n` separated.
pub fn render_csv(report: &Report) -> String {
    let mut lines = Vec::with_capacity(report.len() + 1);
    lines.push(HEADER.join(","));
    for result in &report.results {
        lines.push(row(result));
    }
    lines.join("\n")
}

fn row(result: &ValidationResult) -> String {
    [
        result.field.as_str(),
        result.expected.as_str(),
        result.received.as_str(),
        result.masked.as_str(),
        result.error.as_str(),
        result.status.as_str(),
    ]
    .iter()
    .map(|value| quote(value))
    .collect::<Vec<_>>()
    .join(",")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
