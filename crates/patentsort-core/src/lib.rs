//! Patent certificate records and the holder/type/date sort-and-group engine.

mod error;
pub mod record;
pub mod rules;
pub mod schema;
pub mod sort_key;
pub mod sorter;

pub use error::CoreError;
pub use record::{PatentRecord, parse_records, records_from_value};
pub use rules::{SortRules, TypeRule};
pub use schema::sheet;
pub use sort_key::normalize_holder;
pub use sorter::{GroupedRecords, HolderGroup, Sorter, sort_records};
