//! Arrow/Parquet output for sorted sheets.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Date32Array, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::Date32Type;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use patentsort_core::{GroupedRecords, PatentRecord, SortRules, sheet};
use tracing::info;

use crate::ExportError;

/// Days since the Unix epoch, as stored in Arrow `Date32`.
pub fn date32(date: NaiveDate) -> i32 {
    Date32Type::from_naive_date(date)
}

/// Build one RecordBatch holding the sorted sheet.
pub fn to_record_batch(
    sorted: &GroupedRecords<'_>,
    rules: &SortRules,
) -> Result<RecordBatch, ExportError> {
    let rows = sorted.rows();
    let schema = Arc::new(sheet::patent_sheet_schema());

    let mut inventors = ListBuilder::new(StringBuilder::new());
    for record in rows {
        for name in &record.inventors {
            inventors.values().append_value(name);
        }
        inventors.append(true);
    }

    let dates: Date32Array = rows
        .iter()
        .map(|r| {
            r.application_date
                .as_deref()
                .and_then(|d| rules.parse_date(d))
                .map(date32)
        })
        .collect();

    let columns: Vec<ArrayRef> = vec![
        utf8_column(rows, |r| r.patent_number.as_deref()),
        utf8_column(rows, |r| r.title.as_deref()),
        utf8_column(rows, |r| r.holder.as_deref()),
        utf8_column(rows, |r| r.patent_type.as_deref()),
        Arc::new(inventors.finish()),
        Arc::new(dates),
        utf8_column(rows, |r| r.application_date.as_deref()),
        Arc::new(BooleanArray::from(sorted.group_starts().to_vec())),
        utf8_column(rows, |r| r.source_path.as_deref()),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn utf8_column<'a>(
    rows: &[&'a PatentRecord],
    field: impl Fn(&'a PatentRecord) -> Option<&'a str>,
) -> ArrayRef {
    Arc::new(rows.iter().map(|&r| field(r)).collect::<StringArray>())
}

/// Write the sorted sheet to a Parquet file.
pub fn write_parquet(
    sorted: &GroupedRecords<'_>,
    rules: &SortRules,
    path: &Path,
) -> Result<(), ExportError> {
    let batch = to_record_batch(sorted, rules)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    info!(path = %path.display(), rows = batch.num_rows(), "wrote Parquet sheet");
    Ok(())
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, ExportError> {
    if !path.exists() {
        return Err(ExportError::ParquetNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}
