use std::collections::HashMap;

use crate::model::TourRecord;

/// Per-driver aggregation of the imported tour records.
///
/// Stats are derived data: they are recomputed from the record collection
/// whenever it changes and are never stored. The tour count is always the
/// length of `tour_ids`, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverStat {
    /// Driver identity; non-empty and case-sensitive.
    pub name: String,
    /// Tour ids in encounter order; duplicates are kept as-is.
    pub tour_ids: Vec<String>,
}

impl DriverStat {
    /// Number of tours credited to this driver.
    pub fn tour_count(&self) -> usize {
        self.tour_ids.len()
    }
}

/// Aggregates records into per-driver stats sorted by descending tour count.
///
/// Records with an empty driver name are excluded entirely: they create no
/// stat and count toward no total, so the counts of the returned stats sum
/// to the number of records carrying a driver. Grouping uses exact,
/// case-sensitive string equality.
///
/// `slice::sort_by` is a stable sort, so drivers with equal counts keep the
/// relative order of their first appearance in the input.
pub fn aggregate_records(records: &[TourRecord]) -> Vec<DriverStat> {
    let mut stats: Vec<DriverStat> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for record in records {
        if record.driver.is_empty() {
            continue;
        }

        let slot = *slots.entry(record.driver.clone()).or_insert_with(|| {
            stats.push(DriverStat {
                name: record.driver.clone(),
                tour_ids: Vec::new(),
            });
            stats.len() - 1
        });
        stats[slot].tour_ids.push(record.tour_id.clone());
    }

    stats.sort_by(|lhs, rhs| rhs.tour_count().cmp(&lhs.tour_count()));
    stats
}
