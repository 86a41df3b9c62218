//! Report renderers.
//!
//! Every renderer is a pure function from a `Report` to text so output stays
//! deterministic and testable without touching the filesystem. Writing the
//! result (and printing HTML to PDF) is the job of `output`.

use crate::report::Report;
use anyhow::{Context, Result};

mod csv;
mod html;
mod table;

pub use csv::render_csv;
pub use html::render_html;
pub use table::render_table;

/// Pretty JSON array of result rows.
pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(&report.results).context("serialize report JSON")
}
