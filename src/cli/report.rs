//! Report assembly and rendering
//!
//! Collects the schema, a row preview and column summaries into one report
//! that renders either as colored text or as JSON.

use colored::*;
use serde::Serialize;
use std::fmt::Write;

use crate::config::DisplayConfig;
use crate::models::{DatasetInfo, Table, VariableDescriptor};
use crate::profile::descriptive::NumericSummary;
use crate::profile::stats::{ColumnStatistics, ColumnSummary, DateSummary};
use crate::xport::numeric::format_numeric;

/// Everything reported about one transport file
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub file: String,
    pub dataset: DatasetInfo,
    pub row_count: usize,
    pub schema: Vec<VariableDescriptor>,
    /// Display text per cell; `None` marks missing values
    pub preview: Vec<Vec<Option<String>>>,
    pub columns: Vec<ColumnSummary>,
}

impl ProfileReport {
    pub fn new(
        file: impl Into<String>,
        table: &Table,
        columns: Vec<ColumnSummary>,
        display: &DisplayConfig,
    ) -> Self {
        let preview = table
            .rows
            .iter()
            .take(display.preview_rows)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.display_text(display.fraction_digits))
                    .collect()
            })
            .collect();

        Self {
            file: file.into(),
            dataset: table.dataset.clone(),
            row_count: table.row_count(),
            schema: table.schema.columns.clone(),
            preview,
            columns,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render the report as human-readable text
    pub fn render_text(&self, display: &DisplayConfig) -> String {
        let mut out = String::new();
        let digits = display.fraction_digits.min(4);

        let _ = writeln!(out, "{} {}", "File:".bold(), self.file);
        if let Some(name) = &self.dataset.name {
            let label = self.dataset.label.as_deref().unwrap_or("");
            let _ = writeln!(out, "{} {} {}", "Dataset:".bold(), name, label.dimmed());
        }
        let _ = writeln!(
            out,
            "{} {} columns x {} rows",
            "Shape:".bold(),
            self.schema.len(),
            self.row_count
        );

        let _ = writeln!(out, "\n{}", "Schema".cyan().bold());
        for (i, column) in self.schema.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>3}  {:<8}  {:<9}  {:>4}  {}",
                i + 1,
                column.name,
                column.kind.to_string(),
                column.length,
                column.label.dimmed()
            );
        }

        if !self.preview.is_empty() {
            let _ = writeln!(out, "\n{}", "Preview".cyan().bold());
            let header: Vec<&str> = self.schema.iter().map(|c| c.name.as_str()).collect();
            let _ = writeln!(out, "  {}", header.join(" | ").bold());
            for row in &self.preview {
                let cells: Vec<String> = row
                    .iter()
                    .map(|c| c.clone().unwrap_or_else(|| ".".dimmed().to_string()))
                    .collect();
                let _ = writeln!(out, "  {}", cells.join(" | "));
            }
        }

        if !self.columns.is_empty() {
            let _ = writeln!(out, "\n{}", "Columns".cyan().bold());
        }
        for summary in &self.columns {
            render_column(&mut out, summary, display, digits);
        }
        out
    }
}

fn render_column(out: &mut String, summary: &ColumnSummary, display: &DisplayConfig, digits: usize) {
    let counts = summary.statistics.counts();
    let _ = writeln!(
        out,
        "\n  {} [{}] {}",
        summary.name.green().bold(),
        summary.classified.to_string().yellow(),
        summary.label.dimmed()
    );
    let _ = writeln!(
        out,
        "    total {}  observed {}  missing {} ({:.1}%)  unique {}",
        counts.total,
        counts.observed,
        counts.missing,
        counts.missing_ratio() * 100.0,
        counts.unique
    );

    match &summary.statistics {
        ColumnStatistics::Numeric { summary, .. } => render_numeric(out, summary, digits, ""),
        ColumnStatistics::Date { summary, .. } => render_date(out, summary, digits),
        ColumnStatistics::Factor { levels, .. } => {
            for level in levels.iter().take(display.report_levels) {
                let _ = writeln!(
                    out,
                    "    {:<24} {:>7}  {:>5.1}%",
                    level.value,
                    level.count,
                    level.share * 100.0
                );
            }
            if levels.len() > display.report_levels {
                let more = format!("... {} more levels", levels.len() - display.report_levels);
                let _ = writeln!(out, "    {}", more.dimmed());
            }
        }
        ColumnStatistics::Text { lengths, .. } => render_numeric(out, lengths, digits, "length "),
    }
}

fn render_numeric(out: &mut String, summary: &NumericSummary, digits: usize, prefix: &str) {
    if summary.count == 0 {
        return;
    }
    let f = |v: f64| format_numeric(v, digits);
    let _ = writeln!(
        out,
        "    {}min {}  q1 {}  median {}  q3 {}  max {}",
        prefix,
        f(summary.min),
        f(summary.q1),
        f(summary.median),
        f(summary.q3),
        f(summary.max)
    );
    let _ = writeln!(
        out,
        "    {}mean {}  sd {}",
        prefix,
        f(summary.mean),
        f(summary.std_dev)
    );
    if !summary.histogram.is_empty() {
        let counts: Vec<String> = summary.histogram.iter().map(|b| b.count.to_string()).collect();
        let _ = writeln!(out, "    {}histogram [{}]", prefix, counts.join(" "));
    }
}

fn render_date(out: &mut String, summary: &DateSummary, digits: usize) {
    let (Some(earliest), Some(latest)) = (summary.earliest, summary.latest) else {
        return;
    };
    let _ = writeln!(out, "    earliest {}  latest {}", earliest, latest);
    if let Some(median) = summary.median {
        let _ = writeln!(
            out,
            "    median {}  span {} days  sd {} days",
            median,
            format_numeric(summary.offsets.max, digits),
            format_numeric(summary.offsets.std_dev, digits)
        );
    }
    let _ = writeln!(out, "    {} distinct days", summary.timeline.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;
    use crate::models::{Cell, Schema, VariableKind};
    use crate::profile::cache::summarize_table;

    fn sample_table() -> Table {
        let column = |name: &str, kind| VariableDescriptor {
            name: name.to_string(),
            label: format!("{} label", name),
            kind,
            length: 8,
            ordinal: 0,
            format: Default::default(),
        };
        Table {
            schema: Schema::new(vec![
                column("AGE", VariableKind::Numeric),
                column("SEX", VariableKind::Character),
            ]),
            rows: vec![
                vec![Cell::Number(34.0), Cell::text("F")],
                vec![Cell::Number(47.25), Cell::text("M")],
                vec![Cell::Missing, Cell::text("F")],
            ],
            dataset: DatasetInfo {
                name: Some("DM".to_string()),
                label: None,
            },
        }
    }

    #[test]
    fn test_preview_uses_display_text() {
        let table = sample_table();
        let display = DisplayConfig {
            preview_rows: 2,
            ..DisplayConfig::default()
        };
        let report = ProfileReport::new("dm.xpt", &table, Vec::new(), &display);

        assert_eq!(report.preview.len(), 2);
        assert_eq!(report.preview[0][0].as_deref(), Some("34"));
        assert_eq!(report.preview[1][0].as_deref(), Some("47.25"));
        assert_eq!(report.row_count, 3);
    }

    #[test]
    fn test_render_text_and_json() {
        colored::control::set_override(false);
        let table = sample_table();
        let display = DisplayConfig::default();
        let summaries = summarize_table(&table, &ClassifierConfig::default());
        let report = ProfileReport::new("dm.xpt", &table, summaries, &display);

        let text = report.render_text(&display);
        assert!(text.contains("Dataset: DM"));
        assert!(text.contains("2 columns x 3 rows"));
        assert!(text.contains("AGE [numeric]"));
        assert!(text.contains("SEX [factor]"));
        assert!(text.contains("missing 1"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["row_count"], 3);
        assert_eq!(json["columns"][0]["classified"]["type"], "numeric");
        assert_eq!(json["columns"][1]["statistics"]["levels"][0]["value"], "F");
        assert!(json["preview"][2][0].is_null());
    }
}
