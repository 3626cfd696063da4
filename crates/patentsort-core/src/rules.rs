//! Ordering policy: the patent-type rank table and accepted date formats.
//!
//! The defaults reproduce the fixed table used for certificate sheets:
//!
//! | rank | label          | matches                        |
//! |------|----------------|--------------------------------|
//! | 1    | 发明专利       | invention, invent, 发明        |
//! | 2    | 实用新型专利   | utility, 实用新型, 实用        |
//! | 3    | 外观设计专利   | design, 外观                   |
//! | 4    | anything else, including a missing type        ||
//!
//! Rules can be overridden from JSON; every key is optional.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const INVENTION: &str = "发明专利";
pub const UTILITY_MODEL: &str = "实用新型专利";
pub const DESIGN: &str = "外观设计专利";

/// Rank given to a missing or unrecognised patent type.
pub const DEFAULT_UNKNOWN_TYPE_RANK: u32 = 4;

/// Accepted application-date formats, tried in order.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%Y年%m月%d日",
    "%Y.%m.%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
];

/// One row of the patent-type rank table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    /// Canonical label, e.g. `发明专利`.
    pub label: String,
    pub rank: u32,
    /// Lowercase substrings that identify this type in free text.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl TypeRule {
    fn new(label: &str, rank: u32, aliases: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            rank,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortRules {
    pub patent_types: Vec<TypeRule>,
    pub unknown_type_rank: u32,
    pub date_formats: Vec<String>,
}

impl Default for SortRules {
    fn default() -> Self {
        Self {
            patent_types: vec![
                TypeRule::new(INVENTION, 1, &["invention", "invent", "发明"]),
                TypeRule::new(UTILITY_MODEL, 2, &["utility", "实用新型", "实用"]),
                TypeRule::new(DESIGN, 3, &["design", "外观"]),
            ],
            unknown_type_rank: DEFAULT_UNKNOWN_TYPE_RANK,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl SortRules {
    /// Parse rules from JSON, filling unspecified keys with defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidRules(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.date_formats.is_empty() {
            return Err(CoreError::InvalidRules(
                "at least one date format is required".into(),
            ));
        }
        if let Some(rule) = self.patent_types.iter().find(|r| r.label.trim().is_empty()) {
            return Err(CoreError::InvalidRules(format!(
                "patent type with rank {} has an empty label",
                rule.rank
            )));
        }
        Ok(())
    }

    /// Find the rule a free-text patent type belongs to.
    ///
    /// An exact (case-insensitive) label match wins; otherwise the first rule
    /// in table order with an alias contained in the value.
    pub fn classify_type(&self, patent_type: &str) -> Option<&TypeRule> {
        let value = patent_type.trim().to_lowercase();
        if value.is_empty() {
            return None;
        }
        self.patent_types
            .iter()
            .find(|r| r.label.to_lowercase() == value)
            .or_else(|| {
                self.patent_types.iter().find(|r| {
                    r.aliases
                        .iter()
                        .any(|a| !a.is_empty() && value.contains(&a.to_lowercase()))
                })
            })
    }

    /// Rank of a patent type; lower sorts first.
    pub fn type_rank(&self, patent_type: Option<&str>) -> u32 {
        patent_type
            .and_then(|t| self.classify_type(t))
            .map_or(self.unknown_type_rank, |r| r.rank)
    }

    /// Parse an application date with the first matching format.
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        self.date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranks() {
        let rules = SortRules::default();
        assert_eq!(rules.type_rank(Some("发明专利")), 1);
        assert_eq!(rules.type_rank(Some("实用新型专利")), 2);
        assert_eq!(rules.type_rank(Some("外观设计专利")), 3);
        assert_eq!(rules.type_rank(Some("Unknown Type")), 4);
        assert_eq!(rules.type_rank(Some("")), 4);
        assert_eq!(rules.type_rank(None), 4);
    }

    #[test]
    fn english_and_partial_labels() {
        let rules = SortRules::default();
        assert_eq!(rules.type_rank(Some("Invention")), 1);
        assert_eq!(rules.type_rank(Some("Standard Patent (Invention)")), 1);
        assert_eq!(rules.type_rank(Some("Invention Patent")), 1);
        assert_eq!(rules.type_rank(Some("Utility Model")), 2);
        assert_eq!(rules.type_rank(Some("外观设计")), 3);
        assert_eq!(rules.type_rank(Some("DESIGN")), 3);
    }

    #[test]
    fn classify_returns_canonical_label() {
        let rules = SortRules::default();
        assert_eq!(
            rules.classify_type("utility model").map(|r| r.label.as_str()),
            Some(UTILITY_MODEL)
        );
        assert!(rules.classify_type("trademark").is_none());
    }

    #[test]
    fn supported_date_formats() {
        let rules = SortRules::default();
        let d = NaiveDate::from_ymd_opt(2020, 2, 26).unwrap();
        assert_eq!(rules.parse_date("2020-02-26"), Some(d));
        assert_eq!(rules.parse_date("2020/02/26"), Some(d));
        assert_eq!(rules.parse_date("26/02/2020"), Some(d));
        assert_eq!(rules.parse_date("2020年02月26日"), Some(d));
        assert_eq!(rules.parse_date("2020.02.26"), Some(d));
        assert_eq!(rules.parse_date("02-26-2020"), Some(d));
        assert_eq!(rules.parse_date("26-02-2020"), Some(d));
        assert_eq!(rules.parse_date("  2020-02-26 "), Some(d));
    }

    #[test]
    fn unparsable_dates_are_none() {
        let rules = SortRules::default();
        assert_eq!(rules.parse_date("Invalid Date"), None);
        assert_eq!(rules.parse_date(""), None);
        assert_eq!(rules.parse_date("2020-13-40"), None);
        assert_eq!(rules.parse_date("Feb 26, 2020"), None);
    }

    #[test]
    fn json_overrides_merge_with_defaults() {
        let rules = SortRules::from_json(r#"{"unknown_type_rank": 9}"#).unwrap();
        assert_eq!(rules.unknown_type_rank, 9);
        assert_eq!(rules.patent_types.len(), 3);
        assert_eq!(rules.date_formats.len(), DEFAULT_DATE_FORMATS.len());
    }

    #[test]
    fn json_custom_type_table() {
        let rules = SortRules::from_json(
            r#"{"patent_types": [{"label": "Plant Patent", "rank": 1, "aliases": ["plant"]}]}"#,
        )
        .unwrap();
        assert_eq!(rules.type_rank(Some("plant patent")), 1);
        assert_eq!(rules.type_rank(Some("发明专利")), DEFAULT_UNKNOWN_TYPE_RANK);
    }

    #[test]
    fn invalid_rules_rejected() {
        assert!(matches!(
            SortRules::from_json(r#"{"date_formats": []}"#),
            Err(CoreError::InvalidRules(_))
        ));
        assert!(matches!(
            SortRules::from_json(r#"{"patent_types": [{"label": " ", "rank": 1}]}"#),
            Err(CoreError::InvalidRules(_))
        ));
        assert!(matches!(
            SortRules::from_json("not json"),
            Err(CoreError::Json(_))
        ));
    }
}
