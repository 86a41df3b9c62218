use crate::report::Report;

const HEADERS: [&str; 4] = ["field", "status", "error", "masked"];

/// Console table with the columns `field | status | error | masked`.
pub fn render_table(report: &Report) -> String {
    let rows: Vec<[String; 4]> = report
        .results
        .iter()
        .map(|r| {
            [
                cell(&r.field),
                r.status.glyph().to_string(),
                cell(&r.error),
                cell(&r.masked),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(value));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String; 4], widths: &[usize; 4]) {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(value, width)| pad(value, *width))
        .collect();
    out.push_str(cells.join(" | ").trim_end());
    out.push('\n');
}

fn pad(value: &str, width: usize) -> String {
    let len = display_width(value);
    let mut padded = value.to_string();
    padded.push_str(&" ".repeat(width.saturating_sub(len)));
    padded
}

/// Terminal columns taken by `value`. Emoji and East Asian wide characters
/// take two columns; everything else takes one.
fn display_width(value: &str) -> usize {
    value.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        c,
        '\u{1100}'..='\u{115F}'
            | '\u{2705}'
            | '\u{274C}'
            | '\u{274E}'
            | '\u{2E80}'..='\u{303E}'
            | '\u{3041}'..='\u{A4CF}'
            | '\u{AC00}'..='\u{D7A3}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF00}'..='\u{FF60}'
            | '\u{FFE0}'..='\u{FFE6}'
            | '\u{1F300}'..='\u{1F64F}'
            | '\u{1F680}'..='\u{1F6FF}'
            | '\u{1F900}'..='\u{1F9FF}'
            | '\u{20000}'..='\u{3FFFD}'
    )
}

// Multi-line values would break the grid.
fn cell(value: &str) -> String {
    value.replace('\r', "\\r").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Status, ValidationResult};

    fn row(field: &str, error: &str, masked: &str, status: Status) -> ValidationResult {
        ValidationResult {
            field: field.to_string(),
            expected: String::new(),
            received: String::new(),
            masked: masked.to_string(),
            error: error.to_string(),
            status,
        }
    }

    #[test]
    fn aligns_columns_to_widest_cell() {
        let report = Report {
            results: vec![
                row("DATABASE_URL", "Missing required env var", "N/A", Status::Fail),
                row("API_KEY", "Potential secret detected", "***", Status::SecretFlag),
            ],
            schema_valid: false,
        };
        let table = render_table(&report);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "field        | status | error                     | masked"
        );
        assert_eq!(
            lines[1],
            "-------------+--------+---------------------------+-------"
        );
        assert_eq!(
            lines[2],
            "DATABASE_URL | ❌     | Missing required env var  | N/A"
        );
        assert_eq!(
            lines[3],
            "API_KEY      | 🔒     | Potential secret detected | ***"
        );
    }

    #[test]
    fn separators_line_up_in_terminal_columns() {
        let report = Report {
            results: vec![
                row("PORT", "bad", "x", Status::Fail),
                row("DB_PASSWORD", "Potential secret detected", "***", Status::SecretFlag),
                row("名前", "bad", "値", Status::Fail),
            ],
            schema_valid: false,
        };
        let table = render_table(&report);
        let separators = |line: &str| -> Vec<usize> {
            let mut columns = Vec::new();
            let mut offset = 0;
            for c in line.chars() {
                if c == '|' || c == '+' {
                    columns.push(offset);
                }
                offset += if is_wide(c) { 2 } else { 1 };
            }
            columns
        };
        let expected = separators(table.lines().next().expect("header"));
        assert_eq!(expected.len(), 3);
        for line in table.lines() {
            assert_eq!(separators(line), expected, "misaligned: {line:?}\n{table}");
        }
    }

    #[test]
    fn wide_glyphs_count_as_two_columns() {
        assert_eq!(display_width("❌"), 2);
        assert_eq!(display_width("🔒"), 2);
        assert_eq!(display_width("名前"), 4);
        assert_eq!(display_width("field"), 5);
        assert_eq!(display_width("é"), 1);
    }

    #[test]
    fn escapes_newlines_in_cells() {
        let report = Report {
            results: vec![row("CERT", "bad", "a\nb", Status::Fail)],
            schema_valid: false,
        };
        let table = render_table(&report);
        assert!(table.contains("a\\nb"));
        assert_eq!(table.lines().count(), 3);
    }
}
