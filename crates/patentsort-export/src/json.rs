//! JSON output: the sorted records, each tagged with its group-start flag.

use std::io::Write;

use patentsort_core::{GroupedRecords, PatentRecord};
use serde::Serialize;

use crate::ExportError;

#[derive(Serialize)]
struct SheetEntry<'a> {
    #[serde(flatten)]
    record: &'a PatentRecord,
    group_start: bool,
}

/// Write the sorted records as a pretty-printed JSON array.
pub fn write_json<W: Write>(sorted: &GroupedRecords<'_>, out: W) -> Result<(), ExportError> {
    let entries: Vec<SheetEntry<'_>> = sorted
        .iter()
        .map(|(record, group_start)| SheetEntry {
            record,
            group_start,
        })
        .collect();
    serde_json::to_writer_pretty(out, &entries)?;
    Ok(())
}
