//! Composite sort keys for patent certificate records.
//!
//! Records order by holder, then patent-type rank, then application date
//! (most recent first). Every component is total over "value ∪ missing", so
//! building and comparing keys never fails.
//!
//! # Holder normalisation
//!
//! Holder names come out of OCR and LLM extraction with inconsistent width,
//! spacing, and case: `深圳普瑞金（深圳）有限公司` vs `深圳普瑞金(深圳)有限公司`,
//! `Shenzhen Pregene  Biopharma` vs `SHENZHEN PREGENE BIOPHARMA`. The
//! normalised form folds those differences; the raw value breaks ties so
//! that identical raw holders stay contiguous.

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::record::PatentRecord;
use crate::rules::SortRules;

/// Holder component of a [`RecordKey`].
///
/// Variant order matters: every named holder sorts before a missing one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum HolderKey {
    Named { normalized: String, raw: String },
    Missing,
}

impl HolderKey {
    pub fn new(holder: Option<&str>) -> Self {
        match holder.map(str::trim).filter(|h| !h.is_empty()) {
            Some(raw) => Self::Named {
                normalized: normalize_holder(raw),
                raw: raw.to_string(),
            },
            None => Self::Missing,
        }
    }
}

/// Full ordering key: `(holder, type rank, date descending)`.
///
/// `Reverse<Option<_>>` puts later dates first and `None` (missing or
/// unparsable) after every valid date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordKey {
    pub holder: HolderKey,
    pub type_rank: u32,
    pub date: Reverse<Option<NaiveDate>>,
}

impl RecordKey {
    pub fn for_record(record: &PatentRecord, rules: &SortRules) -> Self {
        Self {
            holder: HolderKey::new(record.holder.as_deref()),
            type_rank: rules.type_rank(record.patent_type.as_deref()),
            date: Reverse(
                record
                    .application_date
                    .as_deref()
                    .and_then(|d| rules.parse_date(d)),
            ),
        }
    }
}

/// Normalise a holder name for comparison.
///
/// 1. Fold full-width ASCII forms (U+FF01..=U+FF5E) to ASCII and the
///    ideographic space (U+3000) to a space
/// 2. Collapse whitespace runs to one space and trim
/// 3. Lowercase
pub fn normalize_holder(s: &str) -> String {
    let folded: String = s.chars().map(fold_width).collect();
    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn fold_width(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        _ => c,
    }
}
