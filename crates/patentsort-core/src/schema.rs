/// Arrow schema definitions for sorted patent sheets.
pub mod sheet {
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    /// Schema for one sorted sheet: the record fields plus the canonical
    /// application date and the group-start marker.
    pub fn patent_sheet_schema() -> Schema {
        Schema::new(vec![
            Field::new("patent_number", DataType::Utf8, true),
            Field::new("title", DataType::Utf8, true),
            Field::new("holder", DataType::Utf8, true),
            Field::new("patent_type", DataType::Utf8, true),
            Field::new(
                "inventors",
                DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
                true,
            ),
            Field::new("application_date", DataType::Date32, true),
            Field::new("application_date_raw", DataType::Utf8, true),
            Field::new("group_start", DataType::Boolean, false),
            Field::new("source_path", DataType::Utf8, true),
        ])
    }
}
