//! CLI argument definitions

use crate::report::schema::DEFAULT_SURVEY_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shoplens",
    about = "Terminal dashboard for the e-commerce vs physical-store shopping survey",
    after_help = "\
EXAMPLES:
    shoplens                                 Open the dashboard on the default survey file
    shoplens responses.csv                   Open the dashboard on a specific file
    shoplens responses.csv --headless        Print the report to stdout
    shoplens responses.csv --export out.json Write the summary JSON alongside the dashboard"
)]
pub struct Args {
    /// Survey CSV to analyze
    #[arg(value_name = "CSV", default_value = DEFAULT_SURVEY_FILE)]
    pub file: PathBuf,

    /// Export the report summary as JSON (for external analysis)
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Export the loaded dataset back out as CSV
    #[arg(long, value_name = "FILE")]
    pub export_csv: Option<PathBuf>,

    /// Delimiter separating multi-select answer tokens
    #[arg(long, default_value = ";")]
    pub delimiter: String,

    /// Run without the TUI; print the report as plain text
    #[arg(long)]
    pub headless: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["shoplens"]);
        assert_eq!(args.file, PathBuf::from(DEFAULT_SURVEY_FILE));
        assert_eq!(args.delimiter, ";");
        assert!(!args.headless);
        assert!(args.export.is_none());
    }

    #[test]
    fn test_explicit_file_and_exports() {
        let args = Args::parse_from([
            "shoplens",
            "responses.csv",
            "--headless",
            "--export",
            "summary.json",
            "--export-csv",
            "roundtrip.csv",
        ]);
        assert_eq!(args.file, PathBuf::from("responses.csv"));
        assert!(args.headless);
        assert_eq!(args.export, Some(PathBuf::from("summary.json")));
        assert_eq!(args.export_csv, Some(PathBuf::from("roundtrip.csv")));
    }
}
