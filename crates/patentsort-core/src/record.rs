//! Patent certificate records as delivered by the extraction layer.
//!
//! Extraction output is loosely typed: keys may be English or Chinese, fields
//! may be absent or `null`, and values are occasionally the wrong JSON type.
//! Ingest turns all of that into a [`PatentRecord`] whose fields are always
//! present, with `None` (or an empty list) standing in for "missing".

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, json_kind};

const PATENT_NUMBER_KEYS: &[&str] = &["patent_number", "专利号"];
const TITLE_KEYS: &[&str] = &["patent_title", "title", "专利名称"];
const HOLDER_KEYS: &[&str] = &["patent_holder", "holder", "权利人", "专利权人"];
const PATENT_TYPE_KEYS: &[&str] = &["patent_type", "专利类型"];
const INVENTORS_KEYS: &[&str] = &["inventors", "发明人"];
const APPLICATION_DATE_KEYS: &[&str] = &["application_date", "申请日期", "申请日"];
const SOURCE_PATH_KEYS: &[&str] = &["file_path", "source_path", "文件路径"];

/// Separator used when inventors are rendered as a single cell.
pub const INVENTOR_SEPARATOR: &str = ";";

/// One certificate's extracted data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatentRecord {
    pub patent_number: Option<String>,
    #[serde(rename = "patent_title")]
    pub title: Option<String>,
    #[serde(rename = "patent_holder")]
    pub holder: Option<String>,
    pub patent_type: Option<String>,
    pub inventors: Vec<String>,
    /// Date as extracted. Parsed against the active date formats at sort time.
    pub application_date: Option<String>,
    #[serde(rename = "file_path", skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl PatentRecord {
    /// Build a record from one JSON object, accepting every known key alias.
    ///
    /// Never fails: unknown keys are ignored and unusable values become `None`.
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            patent_number: first_string(obj, PATENT_NUMBER_KEYS),
            title: first_string(obj, TITLE_KEYS),
            holder: first_string(obj, HOLDER_KEYS),
            patent_type: first_string(obj, PATENT_TYPE_KEYS),
            inventors: INVENTORS_KEYS
                .iter()
                .filter_map(|k| obj.get(*k))
                .map(inventor_list)
                .find(|names| !names.is_empty())
                .unwrap_or_default(),
            application_date: first_string(obj, APPLICATION_DATE_KEYS),
            source_path: first_string(obj, SOURCE_PATH_KEYS),
        }
    }

    /// Inventors as a single semicolon-joined string.
    pub fn inventors_joined(&self) -> String {
        self.inventors.join(INVENTOR_SEPARATOR)
    }
}

impl<'de> Deserialize<'de> for PatentRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let obj = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_object(&obj))
    }
}

/// Parse extraction output (a JSON array of records, or one record object).
pub fn parse_records(json: &str) -> Result<Vec<PatentRecord>, CoreError> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(value)
}

/// Convert an already-parsed JSON value into records.
///
/// A top-level object is treated as a single record. Anything that is not an
/// array of objects is rejected: this is the only failure the sort path has.
pub fn records_from_value(value: Value) -> Result<Vec<PatentRecord>, CoreError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(obj) => Ok(PatentRecord::from_object(obj)),
                other => Err(CoreError::NotARecord {
                    index,
                    found: json_kind(other),
                }),
            })
            .collect(),
        Value::Object(obj) => Ok(vec![PatentRecord::from_object(&obj)]),
        other => Err(CoreError::NotACollection {
            found: json_kind(&other),
        }),
    }
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(lenient_string)
}

/// Read a scalar as a trimmed, non-empty string.
fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(lenient_string).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// Inventors arrive as an array of names or a single `;`-separated string.
///
/// Commas are never split on: transliterated names look like `ZHANG, Jishuai`.
fn inventor_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => split_names(s),
        Value::Array(items) => items
            .iter()
            .filter_map(lenient_string)
            .flat_map(|s| split_names(&s))
            .collect(),
        other => lenient_string(other).into_iter().collect(),
    }
}

fn split_names(s: &str) -> Vec<String> {
    s.split([';', '；']).filter_map(non_empty).collect()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chinese_keys() {
        let records = parse_records(
            r#"[{
                "专利号": "ZL201910297462.7",
                "专利名称": "CD22单域抗体、核苷酸序列及试剂盒",
                "权利人": "深圳普瑞金生物药业有限公司",
                "专利类型": "发明专利",
                "发明人": "李胜华;包朝乐戎",
                "申请日期": "2019-04-12"
            }]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.patent_number.as_deref(), Some("ZL201910297462.7"));
        assert_eq!(r.holder.as_deref(), Some("深圳普瑞金生物药业有限公司"));
        assert_eq!(r.patent_type.as_deref(), Some("发明专利"));
        assert_eq!(r.inventors, vec!["李胜华", "包朝乐戎"]);
        assert_eq!(r.application_date.as_deref(), Some("2019-04-12"));
        assert!(r.source_path.is_none());
    }

    #[test]
    fn english_keys_with_inventor_array() {
        let records = parse_records(
            r#"[{
                "patent_number": "US17-270788",
                "patent_title": "Anti-BCMA single domain antibody and its application",
                "patent_holder": "Shenzhen Pregene Biopharma Co. Ltd.",
                "patent_type": "Invention",
                "inventors": ["ZHANG, Jishuai", "SU, Hongchang"],
                "application_date": "2020-06-01",
                "file_path": "/scans/us.pdf"
            }]"#,
        )
        .unwrap();
        let r = &records[0];
        assert_eq!(
            r.title.as_deref(),
            Some("Anti-BCMA single domain antibody and its application")
        );
        assert_eq!(r.inventors, vec!["ZHANG, Jishuai", "SU, Hongchang"]);
        assert_eq!(r.inventors_joined(), "ZHANG, Jishuai;SU, Hongchang");
        assert_eq!(r.source_path.as_deref(), Some("/scans/us.pdf"));
    }

    #[test]
    fn chinese_extractor_keys() {
        let records = parse_records(
            r#"{"专利权人": "Acme", "申请日": "2021年3月4日", "文件路径": "a.png"}"#,
        )
        .unwrap();
        assert_eq!(records[0].holder.as_deref(), Some("Acme"));
        assert_eq!(records[0].application_date.as_deref(), Some("2021年3月4日"));
        assert_eq!(records[0].source_path.as_deref(), Some("a.png"));
    }

    #[test]
    fn semicolon_string_splits_on_fullwidth_too() {
        let r = PatentRecord::from_object(
            json!({"inventors": "ZHANG, Jishuai; LI, Hongjian；王五 ;"})
                .as_object()
                .unwrap(),
        );
        assert_eq!(r.inventors, vec!["ZHANG, Jishuai", "LI, Hongjian", "王五"]);
    }

    #[test]
    fn nulls_blanks_and_missing_keys_become_none() {
        let r = PatentRecord::from_object(
            json!({"专利号": null, "权利人": "   ", "发明人": null, "unrelated": 1})
                .as_object()
                .unwrap(),
        );
        assert_eq!(r, PatentRecord::default());
    }

    #[test]
    fn wrong_scalar_types_are_stringified() {
        let r = PatentRecord::from_object(
            json!({"patent_number": 2019102974627u64, "patent_type": true, "title": {"x": 1}})
                .as_object()
                .unwrap(),
        );
        assert_eq!(r.patent_number.as_deref(), Some("2019102974627"));
        assert_eq!(r.patent_type.as_deref(), Some("true"));
        assert!(r.title.is_none());
    }

    #[test]
    fn first_usable_alias_wins() {
        let r = PatentRecord::from_object(
            json!({"patent_holder": null, "权利人": "深圳普瑞金生物药业有限公司"})
                .as_object()
                .unwrap(),
        );
        assert_eq!(r.holder.as_deref(), Some("深圳普瑞金生物药业有限公司"));
    }

    #[test]
    fn single_object_is_one_record() {
        let records = parse_records(r#"{"holder": "A"}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_array_is_no_records() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn scalar_top_level_is_rejected() {
        let err = parse_records("42").unwrap_err();
        assert!(matches!(err, CoreError::NotACollection { found: "number" }));
        let err = parse_records("null").unwrap_err();
        assert!(matches!(err, CoreError::NotACollection { found: "null" }));
    }

    #[test]
    fn non_object_element_is_rejected() {
        let err = parse_records(r#"[{"holder": "A"}, "oops"]"#).unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotARecord {
                index: 1,
                found: "string"
            }
        ));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(parse_records("[{"), Err(CoreError::Json(_))));
    }

    #[test]
    fn serialises_with_english_keys() {
        let r = PatentRecord {
            holder: Some("A".into()),
            inventors: vec!["x".into(), "y".into()],
            ..Default::default()
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["patent_holder"], "A");
        assert_eq!(v["inventors"], json!(["x", "y"]));
        assert!(v.get("file_path").is_none());

        let back: PatentRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, r);
    }
}
