//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::error::Result;
use crate::output::Formatter;
use tracing::info;
use vigil_report::compare;
use vigil_store::load_records;

/// Execute the compare command.
pub fn execute_compare(args: CompareArgs, formatter: &Formatter) -> Result<()> {
    let filtered = load_records(&args.results)?;
    let original = load_records(&args.original)?;
    info!(
        "Comparing {} ({} rows) with {} ({} rows)",
        args.results.display(),
        filtered.len(),
        args.original.display(),
        original.len()
    );

    let comparison = compare(&filtered, &original, args.samples)?;
    println!("{}", formatter.format_comparison(&comparison)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use tempfile::TempDir;
    use vigil_domain::{Comment, ResultRecord, Verdict};
    use vigil_report::ReportError;
    use vigil_store::save_records;

    #[test]
    fn test_compare_files() {
        let dir = TempDir::new().unwrap();
        let results = dir.path().join("filtered.csv");
        let original = dir.path().join("original.csv");
        let rows = vec![ResultRecord::new(&Comment::new(0, "hi"), Verdict::prefilter_clean())];
        save_records(&results, &rows).unwrap();
        save_records(&original, &rows).unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let args = CompareArgs {
            results,
            original,
            samples: None,
        };
        assert!(execute_compare(args, &formatter).is_ok());
    }

    #[test]
    fn test_compare_rejects_zero_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let rows = vec![ResultRecord::new(&Comment::new(0, "hi"), Verdict::prefilter_clean())];
        save_records(&path, &rows).unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = CompareArgs {
            results: path.clone(),
            original: path,
            samples: Some(0),
        };
        assert!(matches!(
            execute_compare(args, &formatter),
            Err(CliError::Report(ReportError::InvalidSamples(0)))
        ));
    }

    #[test]
    fn test_compare_missing_original() {
        let dir = TempDir::new().unwrap();
        let results = dir.path().join("results.csv");
        save_records(&results, &[]).unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = CompareArgs {
            results,
            original: dir.path().join("missing.csv"),
            samples: None,
        };
        assert!(matches!(
            execute_compare(args, &formatter),
            Err(CliError::Store(vigil_store::StoreError::NotFound(_)))
        ));
    }
}
