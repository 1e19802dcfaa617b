//! Report command implementation.

use crate::cli::{ReportArgs, ViewArgs};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use vigil_domain::ResultRecord;
use vigil_report::{charts, filter_by_type, top_severe, Summary};
use vigil_store::load_records;

/// Execute the report command.
pub fn execute_report(args: ReportArgs, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.results)?;
    println!("{}", render_views(&records, &args.view, formatter)?);
    Ok(())
}

/// Summary, most severe comments, per-type listing and charts for a table.
pub fn render_views(
    records: &[ResultRecord],
    view: &ViewArgs,
    formatter: &Formatter,
) -> Result<String> {
    let mut sections = vec![formatter.format_summary(&Summary::from_records(records))?];

    if view.top_severe > 0 {
        let title = match view.filter_type {
            Some(t) => format!("Top {} most severe {} comments", view.top_severe, t),
            None => format!("Top {} most severe comments", view.top_severe),
        };
        let top = top_severe(records, view.top_severe, view.filter_type);
        sections.push(formatter.format_records(&title, &top)?);
    }

    if let Some(offense_type) = view.filter_type {
        let matches = filter_by_type(records, offense_type);
        let title = format!("Comments classified as {} ({})", offense_type, matches.len());
        sections.push(formatter.format_records(&title, &matches)?);
    }

    if view.charts {
        let text = charts::render_all(records);
        sections.push(match formatter.format() {
            OutputFormat::Table => text,
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "charts": text,
            }))?,
        });
    }

    Ok(sections.join("\n\n"))
}
