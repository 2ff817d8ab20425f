//! Catalog, diff and Markdown report rendering.

use crate::catalog::{Catalog, CatalogEntry};
use crate::layout::{OutputLayout, to_json_document, write_all_atomic};
use anyhow::Result;
use std::fmt::Write as _;
use std::path::PathBuf;

pub const DEFAULT_TOP: usize = 30;
pub const DEFAULT_TITLE: &str = "API Compatibility Priority Report";

const HEADERS: [&str; 4] = ["Method", "Path", "Sources", "Priority Score"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    pub top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            top: DEFAULT_TOP,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendered contents of the three merge outputs.
pub struct ReportArtifacts {
    pub catalog_json: String,
    pub diff_json: String,
    pub report_markdown: String,
}

impl ReportArtifacts {
    pub fn render(catalog: &Catalog, options: &ReportOptions) -> Result<Self> {
        Ok(Self {
            catalog_json: to_json_document(catalog.entries())?,
            diff_json: to_json_document(&catalog.undocumented())?,
            report_markdown: render_markdown(catalog, options),
        })
    }

    /// Write all three artifacts; none become visible unless all were staged.
    pub fn write(&self, layout: &OutputLayout) -> Result<Vec<PathBuf>> {
        write_all_atomic(&[
            (layout.final_catalog(), self.catalog_json.clone()),
            (layout.diff(), self.diff_json.clone()),
            (layout.report(), self.report_markdown.clone()),
        ])
    }
}

/// Fixed-width top-N table followed by the undocumented-endpoint list.
pub fn render_markdown(catalog: &Catalog, options: &ReportOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", options.title);
    let _ = writeln!(out, "## Top {} High-Priority Endpoints\n", options.top);
    out.push_str(&render_table(catalog.top(options.top)));

    out.push_str("\n## Required but missing from OpenAPI\n\n");
    let undocumented = catalog.undocumented();
    if undocumented.is_empty() {
        out.push_str("None found.\n");
    } else {
        for entry in undocumented {
            let _ = writeln!(
                out,
                "- **{} {}** (Found in: {})",
                entry.method,
                entry.path,
                entry.source_list()
            );
        }
    }
    out
}

fn render_table(entries: &[CatalogEntry]) -> String {
    let rows: Vec<[String; 4]> = entries
        .iter()
        .map(|entry| {
            [
                table_cell(entry.method.as_str()),
                table_cell(entry.path.as_str()),
                entry.source_list(),
                entry.priority.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule = widths.map(|width| "-".repeat(width));
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

/// Pipes inside a cell would end it early.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    out.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        let _ = write!(out, " {cell:<width$} |");
    }
    out.push('\n');
}
