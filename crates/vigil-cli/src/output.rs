//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use vigil_domain::{OffenseType, ResultRecord};
use vigil_report::{Comparison, SeverityStats, Summary};
use vigil_runner::RunMetrics;

/// Longest comment excerpt shown in a table cell
const EXCERPT_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the analysis summary of a result table.
    pub fn format_summary(&self, summary: &Summary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary_json(summary))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                builder.push_record(["Total comments".to_string(), summary.total.to_string()]);
                builder.push_record([
                    "Offensive".to_string(),
                    format!(
                        "{} ({:.1}%)",
                        summary.offensive,
                        summary.offensive_rate() * 100.0
                    ),
                ]);
                builder.push_record([
                    "Non-offensive".to_string(),
                    summary.non_offensive().to_string(),
                ]);
                builder.push_record(["Errors".to_string(), summary.errors.to_string()]);
                for (offense_type, count) in &summary.by_type {
                    builder.push_record([format!("  {}", offense_type), count.to_string()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a list of records under a heading.
    pub fn format_records(&self, title: &str, records: &[&ResultRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<Value> = records.iter().copied().map(record_json).collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "title": title,
                    "records": rows,
                }))?)
            }
            OutputFormat::Table => {
                let heading = self.colorize(title, "cyan");
                if records.is_empty() {
                    return Ok(format!("{}\n{}", heading, self.colorize("No comments found.", "yellow")));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "User", "Type", "Severity", "Comment", "Explanation"]);
                for record in records {
                    builder.push_record([
                        record.comment_id.to_string(),
                        record.username.clone(),
                        record.offense_type.to_string(),
                        format!("{:.2}", record.severity),
                        excerpt(&record.original_comment),
                        excerpt(&record.explanation),
                    ]);
                }
                Ok(format!("{}\n{}", heading, self.render(builder)))
            }
        }
    }

    /// Format a comparison of two result tables.
    pub fn format_comparison(&self, comparison: &Comparison) -> Result<String> {
        let m = &comparison.matrix;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "samples": comparison.samples,
                "confusion_matrix": {
                    "true_positives": m.true_positives,
                    "false_positives": m.false_positives,
                    "false_negatives": m.false_negatives,
                    "true_negatives": m.true_negatives,
                },
                "metrics": {
                    "accuracy": m.accuracy(),
                    "precision": m.precision(),
                    "recall": m.recall(),
                    "f1": m.f1(),
                },
                "filtered": side_json(&comparison.filtered),
                "original": side_json(&comparison.original),
            }))?),
            OutputFormat::Table => {
                let mut sections = Vec::new();
                sections.push(self.colorize(
                    &format!("Compared {} comments", comparison.samples),
                    "cyan",
                ));

                let mut matrix = Builder::default();
                matrix.push_record(["", "Original: offensive", "Original: not offensive"]);
                matrix.push_record([
                    "Filtered: offensive".to_string(),
                    m.true_positives.to_string(),
                    m.false_positives.to_string(),
                ]);
                matrix.push_record([
                    "Filtered: not offensive".to_string(),
                    m.false_negatives.to_string(),
                    m.true_negatives.to_string(),
                ]);
                sections.push(self.render(matrix));

                let mut metrics = Builder::default();
                metrics.push_record(["Metric", "Value"]);
                for (name, value) in [
                    ("Accuracy", m.accuracy()),
                    ("Precision", m.precision()),
                    ("Recall", m.recall()),
                    ("F1 score", m.f1()),
                ] {
                    metrics.push_record([name.to_string(), format!("{:.4}", value)]);
                }
                sections.push(self.render(metrics));

                let (f, o) = (&comparison.filtered, &comparison.original);
                let mut sides = Builder::default();
                sides.push_record(["", "Filtered", "Original"]);
                sides.push_record([
                    "Rows in file".to_string(),
                    f.table_rows.to_string(),
                    o.table_rows.to_string(),
                ]);
                sides.push_record([
                    "Offensive".to_string(),
                    f.offensive.to_string(),
                    o.offensive.to_string(),
                ]);
                sides.push_record([
                    "Non-offensive".to_string(),
                    f.non_offensive.to_string(),
                    o.non_offensive.to_string(),
                ]);
                for offense_type in OffenseType::OFFENSIVE {
                    sides.push_record([
                        format!("  {}", offense_type),
                        count_of(&f.by_type, offense_type),
                        count_of(&o.by_type, offense_type),
                    ]);
                }
                sections.push(self.render(sides));

                let mut severity = Builder::default();
                severity.push_record(["Severity", "Filtered", "Original"]);
                let stats: [(&str, fn(&SeverityStats) -> f64); 4] = [
                    ("Mean", |s: &SeverityStats| s.mean),
                    ("Min", |s: &SeverityStats| s.min),
                    ("Median", |s: &SeverityStats| s.median),
                    ("Max", |s: &SeverityStats| s.max),
                ];
                for (name, pick) in stats {
                    severity.push_record([
                        name.to_string(),
                        f.severity.as_ref().map_or("-".to_string(), |s| format!("{:.2}", pick(s))),
                        o.severity.as_ref().map_or("-".to_string(), |s| format!("{:.2}", pick(s))),
                    ]);
                }
                sections.push(self.render(severity));

                Ok(sections.join("\n"))
            }
        }
    }

    /// Format the metrics of a finished run.
    pub fn format_metrics(&self, metrics: &RunMetrics) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let by_type: BTreeMap<&str, usize> = metrics
                    .by_offense_type
                    .iter()
                    .map(|(t, n)| (t.as_str(), *n))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "batches_planned": metrics.batches_planned,
                    "batches_completed": metrics.batches_completed,
                    "batches_failed": metrics.batches_failed,
                    "comments_classified": metrics.comments_classified,
                    "offensive": metrics.offensive(),
                    "error_verdicts": metrics.error_verdicts,
                    "checkpoint_writes": metrics.checkpoint_writes,
                    "elapsed_secs": metrics.elapsed.as_secs_f64(),
                    "by_offense_type": by_type,
                }))?)
            }
            OutputFormat::Table => Ok(metrics.summary()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn summary_json(summary: &Summary) -> Value {
    let by_type: BTreeMap<&str, usize> = summary
        .by_type
        .iter()
        .map(|(t, n)| (t.as_str(), *n))
        .collect();
    json!({
        "total": summary.total,
        "offensive": summary.offensive,
        "non_offensive": summary.non_offensive(),
        "errors": summary.errors,
        "offensive_rate": summary.offensive_rate(),
        "by_type": by_type,
    })
}

fn record_json(record: &ResultRecord) -> Value {
    json!({
        "comment_id": record.comment_id,
        "username": record.username,
        "original_comment": record.original_comment,
        "is_offensive": record.is_offensive,
        "offense_type": record.offense_type.as_str(),
        "explanation": record.explanation,
        "severity": record.severity,
    })
}

fn side_json(side: &vigil_report::SideStats) -> Value {
    let by_type: BTreeMap<&str, usize> =
        side.by_type.iter().map(|(t, n)| (t.as_str(), *n)).collect();
    json!({
        "table_rows": side.table_rows,
        "offensive": side.offensive,
        "non_offensive": side.non_offensive,
        "by_type": by_type,
        "severity": side.severity.map(|s| json!({
            "count": s.count,
            "mean": s.mean,
            "min": s.min,
            "median": s.median,
            "max": s.max,
        })),
    })
}

fn count_of(counts: &BTreeMap<OffenseType, usize>, offense_type: OffenseType) -> String {
    counts.get(&offense_type).copied().unwrap_or(0).to_string()
}

/// Shorten text for a table cell, flattening newlines.
fn excerpt(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= EXCERPT_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(EXCERPT_CHARS - 3).collect();
        format!("{}...", cut)
    }
}
