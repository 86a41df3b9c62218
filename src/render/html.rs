use crate::report::{Report, Status};

const STYLE: &str = "\
table {border-collapse: collapse; width:100%;}
th,td {border:1px solid #ddd; padding:8px; text-align:left;}
tr:nth-child(even){background:#f2f2f2;}
.error {background: #ffebee;}
.secret {background: #e3f2fd;}";

/// Standalone HTML document used as the PDF source.
pub fn render_html(report: &Report, schema_name: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<title>Env Var Validation Report</title>\n");
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("\n</style>\n</head>\n<body>\n");
    out.push_str("<h1>Env Validation Report</h1>\n");
    out.push_str(&format!("<p>Schema: {}</p>\n", escape_html(schema_name)));
    out.push_str("<table>\n");
    out.push_str("  <tr><th>Field</th><th>Status</th><th>Error</th><th>Value</th></tr>\n");
    for result in &report.results {
        out.push_str(&format!(
            "  <tr class='{}'><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row_class(result.status),
            escape_html(&result.field),
            result.status.glyph(),
            escape_html(&result.error),
            escape_html(&result.masked),
        ));
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}

fn row_class(status: Status) -> &'static str {
    match status {
        Status::Fail => "error",
        Status::SecretFlag => "secret",
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
