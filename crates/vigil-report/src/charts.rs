//! Horizontal bar charts rendered as text

use crate::summary::{severity_by_type, Summary};
use std::fmt::Write;
use vigil_domain::ResultRecord;

const BAR_WIDTH: usize = 40;
const HISTOGRAM_BINS: usize = 10;

/// A titled set of labelled values
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    title: String,
    bars: Vec<(String, f64)>,
    decimals: usize,
}

impl BarChart {
    /// Create an empty chart
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bars: Vec::new(),
            decimals: 0,
        }
    }

    /// Digits shown after the decimal point for values
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Add a bar
    pub fn bar(mut self, label: impl Into<String>, value: f64) -> Self {
        self.bars.push((label.into(), value));
        self
    }

    /// Bars in insertion order
    pub fn bars(&self) -> &[(String, f64)] {
        &self.bars
    }

    /// Render the chart, scaling the longest bar to a fixed width
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{}", "-".repeat(self.title.chars().count()));

        if self.bars.is_empty() {
            out.push_str("(no data)\n");
            return out;
        }

        let label_width = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let max = self.bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

        for (label, value) in &self.bars {
            let len = if max > 0.0 {
                ((value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let _ = writeln!(
                out,
                "{:<lw$} | {:<bw$} {:.d$}",
                label,
                "█".repeat(len),
                value,
                lw = label_width,
                bw = BAR_WIDTH,
                d = self.decimals
            );
        }
        out
    }
}

/// Offensive vs non-offensive comment counts
pub fn offensive_distribution(records: &[ResultRecord]) -> BarChart {
    let summary = Summary::from_records(records);
    BarChart::new("Offensive vs Non-Offensive Comments")
        .bar("Non-Offensive", summary.non_offensive() as f64)
        .bar("Offensive", summary.offensive as f64)
}

/// Counts per offense type over all rows, most frequent first
pub fn offense_type_counts(records: &[ResultRecord]) -> BarChart {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let label = record.offense_type.as_str();
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .fold(BarChart::new("Distribution of Offense Types"), |chart, (label, n)| {
            chart.bar(label, n as f64)
        })
}

/// Severity histogram of offensive comments over [0, 1]
pub fn severity_histogram(records: &[ResultRecord]) -> BarChart {
    let mut bins = [0usize; HISTOGRAM_BINS];
    for record in records.iter().filter(|r| r.is_offensive) {
        let bin = (record.severity.clamp(0.0, 1.0) * HISTOGRAM_BINS as f64) as usize;
        bins[bin.min(HISTOGRAM_BINS - 1)] += 1;
    }

    bins.iter().enumerate().fold(
        BarChart::new("Severity Scores of Offensive Comments"),
        |chart, (i, &n)| {
            let lo = i as f64 / HISTOGRAM_BINS as f64;
            let hi = (i + 1) as f64 / HISTOGRAM_BINS as f64;
            chart.bar(format!("{:.1}-{:.1}", lo, hi), n as f64)
        },
    )
}

/// Mean severity per offense type among offensive comments
pub fn mean_severity_by_type(records: &[ResultRecord]) -> BarChart {
    severity_by_type(records).into_iter().fold(
        BarChart::new("Mean Severity by Offense Type").with_decimals(2),
        |chart, (offense_type, stats)| {
            chart.bar(format!("{} (n={})", offense_type, stats.count), stats.mean)
        },
    )
}

/// Every chart, separated by blank lines
pub fn render_all(records: &[ResultRecord]) -> String {
    [
        offensive_distribution(records),
        offense_type_counts(records),
        severity_histogram(records),
        mean_severity_by_type(records),
    ]
    .iter()
    .map(BarChart::render)
    .collect::<Vec<_>>()
    .join("\n")
}
