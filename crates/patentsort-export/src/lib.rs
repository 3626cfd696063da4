//! Sheet writers: CSV (spreadsheet), Parquet (Arrow), and JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use patentsort_core::{GroupedRecords, SortRules};
use tracing::info;

mod columnar;
mod error;
mod format;
mod json;
pub mod sheet;
mod spreadsheet;

pub use columnar::{date32, read_parquet, to_record_batch, write_parquet};
pub use error::ExportError;
pub use format::{ExportFormat, FALLBACK_STEM, output_file_stem};
pub use json::write_json;
pub use spreadsheet::{CsvOptions, write_csv, write_csv_file};

/// Write a sorted sheet to `path` in the given format.
pub fn export_sheet(
    sorted: &GroupedRecords<'_>,
    rules: &SortRules,
    format: ExportFormat,
    csv_options: CsvOptions,
    path: &Path,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => write_csv_file(sorted, rules, csv_options, path),
        ExportFormat::Parquet => write_parquet(sorted, rules, path),
        ExportFormat::Json => {
            let mut out = BufWriter::new(File::create(path)?);
            write_json(sorted, &mut out)?;
            out.flush()?;
            info!(path = %path.display(), rows = sorted.len(), "wrote JSON sheet");
            Ok(())
        }
    }
}
