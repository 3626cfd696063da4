//! CSV spreadsheet output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use patentsort_core::{GroupedRecords, SortRules};
use tracing::info;

use crate::ExportError;
use crate::sheet::{HEADERS, row_cells};

/// Spreadsheet applications need the BOM to detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// Prefix the output with a UTF-8 byte-order mark.
    pub bom: bool,
    /// Insert an empty row above every group start except the first.
    pub separate_groups: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            bom: true,
            separate_groups: false,
        }
    }
}

/// Write the sorted sheet as CSV.
pub fn write_csv<W: Write>(
    sorted: &GroupedRecords<'_>,
    rules: &SortRules,
    options: CsvOptions,
    mut out: W,
) -> Result<(), ExportError> {
    if options.bom {
        out.write_all(UTF8_BOM)?;
    }
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADERS)?;

    for (i, (record, starts_group)) in sorted.iter().enumerate() {
        if options.separate_groups && starts_group && i > 0 {
            wtr.write_record([""; HEADERS.len()])?;
        }
        wtr.write_record(row_cells(record, rules))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the sorted sheet to a CSV file.
pub fn write_csv_file(
    sorted: &GroupedRecords<'_>,
    rules: &SortRules,
    options: CsvOptions,
    path: &Path,
) -> Result<(), ExportError> {
    let file = BufWriter::new(File::create(path)?);
    write_csv(sorted, rules, options, file)?;
    info!(path = %path.display(), rows = sorted.len(), "wrote CSV sheet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use patentsort_core::{PatentRecord, sort_records};

    fn rec(number: &str, holder: &str, date: &str) -> PatentRecord {
        PatentRecord {
            patent_number: Some(number.into()),
            holder: Some(holder.into()),
            patent_type: Some("发明专利".into()),
            application_date: Some(date.into()),
            ..Default::default()
        }
    }

    fn render(options: CsvOptions, records: &[PatentRecord]) -> String {
        let sorted = sort_records(records);
        let mut buf = Vec::new();
        write_csv(&sorted, &SortRules::default(), options, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_and_sorted_rows() {
        let records = vec![rec("2", "B", "2020-01-01"), rec("1", "A", "2019/05/06")];
        let out = render(
            CsvOptions {
                bom: false,
                separate_groups: false,
            },
            &records,
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "专利号,专利名称,权利人,专利类型,发明人,申请日期");
        assert_eq!(lines[1], "1,,A,发明专利,,2019-05-06");
        assert_eq!(lines[2], "2,,B,发明专利,,2020-01-01");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn bom_prefix() {
        let out = render(CsvOptions::default(), &[]);
        assert!(out.starts_with('\u{FEFF}'));
    }

    #[test]
    fn blank_rows_between_groups() {
        let records = vec![
            rec("1", "A", "2020-01-01"),
            rec("2", "A", "2019-01-01"),
            rec("3", "B", "2020-01-01"),
        ];
        let out = render(
            CsvOptions {
                bom: false,
                separate_groups: true,
            },
            &records,
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));
        assert_eq!(lines[3], ",,,,,");
        assert!(lines[4].starts_with("3,"));
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        let records = vec![rec("1", "A", "2020-01-01")];
        let sorted = sort_records(&records);
        write_csv_file(&sorted, &SortRules::default(), CsvOptions::default(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
