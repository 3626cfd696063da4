//! Cell rendering shared by every sheet writer.

use patentsort_core::{PatentRecord, SortRules};

/// Column headers, in sheet order.
pub const HEADERS: [&str; 6] = ["专利号", "专利名称", "权利人", "专利类型", "发明人", "申请日期"];

/// Render one record as sheet cells.
///
/// The application date is shown in canonical `YYYY-MM-DD` form when it
/// parses, and as extracted otherwise so nothing is hidden from review.
pub fn row_cells(record: &PatentRecord, rules: &SortRules) -> [String; 6] {
    [
        record.patent_number.clone().unwrap_or_default(),
        record.title.clone().unwrap_or_default(),
        record.holder.clone().unwrap_or_default(),
        record.patent_type.clone().unwrap_or_default(),
        record.inventors_joined(),
        display_date(record, rules),
    ]
}

fn display_date(record: &PatentRecord, rules: &SortRules) -> String {
    let Some(raw) = record.application_date.as_deref() else {
        return String::new();
    };
    match rules.parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}
