//! Output formats and file naming.

use std::fmt;
use std::str::FromStr;

use patentsort_core::PatentRecord;

/// File stem used when no record carries a usable holder.
pub const FALLBACK_STEM: &str = "专利信息汇总";
const STEM_SUFFIX: &str = "-专利信息";
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Parquet,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
            Self::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format '{s}' (expected csv, parquet, or json)")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive an output file stem from the first record with a usable holder.
///
/// `深圳普瑞金生物药业有限公司` → `深圳普瑞金生物药业有限公司-专利信息`.
/// Characters that are invalid in file names are stripped; literal
/// `none`/`null` placeholders from extraction are skipped.
pub fn output_file_stem(records: &[PatentRecord]) -> String {
    records
        .iter()
        .filter_map(|r| r.holder.as_deref())
        .map(str::trim)
        .filter(|h| !is_placeholder(h))
        .map(|h| h.replace(FORBIDDEN_CHARS, ""))
        .find(|h| !h.trim().is_empty())
        .map(|h| format!("{}{STEM_SUFFIX}", h.trim()))
        .unwrap_or_else(|| FALLBACK_STEM.to_string())
}

fn is_placeholder(holder: &str) -> bool {
    holder.is_empty()
        || holder.eq_ignore_ascii_case("none")
        || holder.eq_ignore_ascii_case("null")
}
