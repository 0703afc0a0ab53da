//! Report and dataset export.
//!
//! Two machine-readable artifacts back the dashboard:
//! - a JSON summary of the built report (sections, tables, KPIs, skipped
//!   list) for downstream analysis, and
//! - a verbatim CSV round-trip of the loaded dataset (trimmed headers,
//!   cells as stored), the counterpart of the original report's download
//!   button.

use crate::dataset::Dataset;
use crate::domain::ExportError;
use crate::report::Report;
use std::io::Write;

/// Serialize the whole report as pretty-printed JSON.
///
/// # Errors
/// Returns an [`ExportError`] on serialization or IO failure.
pub fn write_summary_json<W: Write>(report: &Report, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Write the dataset back out as CSV, exactly as held in memory.
///
/// # Errors
/// Returns an [`ExportError`] on IO failure.
pub fn write_dataset_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(dataset.headers())?;
    for row in dataset.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_csv_round_trips() {
        let source = "Channel,Score\nOnline,4\nLoja física,2\n";
        let dataset = Dataset::from_reader(source.as_bytes()).expect("fixture CSV should parse");

        let mut buffer = Vec::new();
        write_dataset_csv(&dataset, &mut buffer).expect("export succeeds");

        let reloaded = Dataset::from_reader(buffer.as_slice()).expect("exported CSV reparses");
        assert_eq!(reloaded.headers(), dataset.headers());
        assert_eq!(reloaded.rows(), dataset.rows());
    }
}
