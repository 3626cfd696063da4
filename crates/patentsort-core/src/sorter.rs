//! Stable multi-key sort with holder grouping.
//!
//! [`Sorter::sort`] returns a [`GroupedRecords`] view: a permutation of the
//! input plus one "starts a new group" flag per row. A group starts exactly
//! where the holder changes; type and date only order rows inside a group.

use tracing::debug;

use crate::record::PatentRecord;
use crate::rules::SortRules;
use crate::sort_key::RecordKey;

/// Sorts records according to a set of [`SortRules`].
#[derive(Debug, Clone, Default)]
pub struct Sorter {
    rules: SortRules,
}

impl Sorter {
    pub fn new(rules: SortRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SortRules {
        &self.rules
    }

    /// Order `records` by holder, type rank, then date descending.
    ///
    /// Records with identical keys keep their input order. The input is not
    /// modified.
    pub fn sort<'a>(&self, records: &'a [PatentRecord]) -> GroupedRecords<'a> {
        let keys: Vec<RecordKey> = records
            .iter()
            .map(|r| RecordKey::for_record(r, &self.rules))
            .collect();

        let mut order: Vec<usize> = (0..records.len()).collect();
        // `sort_by` is stable.
        order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

        let rows: Vec<&PatentRecord> = order.iter().map(|&i| &records[i]).collect();
        let group_starts = group_starts(&keys, &order);

        debug!(
            records = rows.len(),
            groups = group_starts.iter().filter(|&&s| s).count(),
            "sorted patent records"
        );

        GroupedRecords {
            rows,
            order,
            group_starts,
        }
    }
}

/// Sort with the default rules.
pub fn sort_records(records: &[PatentRecord]) -> GroupedRecords<'_> {
    Sorter::default().sort(records)
}

/// Mark each row whose holder key differs from its predecessor's. Row 0
/// always starts a group.
///
/// Comparing the same [`HolderKey`](crate::sort_key::HolderKey) the sort used
/// keeps every group contiguous: `"A"` and `"A "` share one group, and so do
/// `None`, `""` and whitespace-only holders.
fn group_starts(keys: &[RecordKey], order: &[usize]) -> Vec<bool> {
    order
        .iter()
        .enumerate()
        .map(|(i, &src)| i == 0 || keys[order[i - 1]].holder != keys[src].holder)
        .collect()
}

/// Sorted view over borrowed records with aligned group-start markers.
#[derive(Debug, Clone)]
pub struct GroupedRecords<'a> {
    rows: Vec<&'a PatentRecord>,
    order: Vec<usize>,
    group_starts: Vec<bool>,
}

impl<'a> GroupedRecords<'a> {
    pub fn rows(&self) -> &[&'a PatentRecord] {
        &self.rows
    }

    /// One flag per row; `true` where a holder's block begins.
    pub fn group_starts(&self) -> &[bool] {
        &self.group_starts
    }

    /// Input index of each sorted row.
    pub fn source_indices(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows above which a separator is drawn: every group start except the first row.
    pub fn separators(&self) -> Vec<usize> {
        self.group_starts
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, &starts)| starts.then_some(i))
            .collect()
    }

    /// `(record, starts_group)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a PatentRecord, bool)> + '_ {
        self.rows
            .iter()
            .copied()
            .zip(self.group_starts.iter().copied())
    }

    /// Contiguous per-holder blocks in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = HolderGroup<'_, 'a>> + '_ {
        let mut starts: Vec<usize> = self
            .group_starts
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect();
        starts.push(self.rows.len());
        (0..starts.len().saturating_sub(1)).map(move |g| {
            let rows = &self.rows[starts[g]..starts[g + 1]];
            let first: &'a PatentRecord = rows[0];
            HolderGroup {
                holder: first
                    .holder
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty()),
                rows,
            }
        })
    }

    /// Clone the records out in sorted order.
    pub fn into_records(self) -> Vec<PatentRecord> {
        self.rows.into_iter().cloned().collect()
    }
}

/// All rows sharing one holder. `holder` is trimmed, and `None` for the
/// trailing group of missing or blank holders.
#[derive(Debug, Clone, Copy)]
pub struct HolderGroup<'g, 'a> {
    pub holder: Option<&'a str>,
    pub rows: &'g [&'a PatentRecord],
}
