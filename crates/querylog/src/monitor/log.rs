use super::types::{QueryLogEntry, QueryType, round_hundredths};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Append-only, execution-ordered record of timed queries.
///
/// Appends are serialized through a mutex so a log shared by concurrent
/// callers never loses or interleaves entries. Readers get snapshots.
#[derive(Debug, Default)]
pub struct QueryLog {
    entries: Mutex<Vec<QueryLogEntry>>,
}

/// Aggregates over a query log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySummary {
    /// Number of recorded queries.
    pub total_queries: usize,
    /// Sum of recorded durations, in milliseconds, two decimal places.
    pub total_duration_ms: f64,
    /// The slowest entry; the earliest one wins ties.
    pub slowest: Option<QueryLogEntry>,
    /// Number of SELECT queries.
    pub select_count: usize,
    /// Number of INSERT queries.
    pub insert_count: usize,
    /// Number of UPDATE queries.
    pub update_count: usize,
    /// Number of DELETE queries.
    pub delete_count: usize,
}

impl QueryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are only ever pushed whole, so a poisoned lock still guards a
    // consistent vector.
    fn lock(&self) -> MutexGuard<'_, Vec<QueryLogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn push(&self, entry: QueryLogEntry) {
        self.lock().push(entry);
    }

    /// Snapshot of all entries, in execution order.
    pub fn entries(&self) -> Vec<QueryLogEntry> {
        self.lock().clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of all recorded durations, in milliseconds, two decimal places.
    pub fn total_duration_ms(&self) -> f64 {
        round_hundredths(self.lock().iter().map(QueryLogEntry::duration_ms).sum())
    }

    /// Entries that took at least `threshold`, in execution order.
    pub fn slow_queries(&self, threshold: Duration) -> Vec<QueryLogEntry> {
        let threshold_ms = threshold.as_secs_f64() * 1000.0;
        self.lock()
            .iter()
            .filter(|entry| entry.duration_ms() >= threshold_ms)
            .cloned()
            .collect()
    }

    /// Aggregate counts and timings over the current entries.
    pub fn summary(&self) -> QuerySummary {
        let entries = self.lock();
        let mut summary = QuerySummary {
            total_queries: entries.len(),
            ..QuerySummary::default()
        };

        for entry in entries.iter() {
            summary.total_duration_ms += entry.duration_ms();

            match entry.query_type() {
                QueryType::Select => summary.select_count += 1,
                QueryType::Insert => summary.insert_count += 1,
                QueryType::Update => summary.update_count += 1,
                QueryType::Delete => summary.delete_count += 1,
                QueryType::Other => {}
            }

            let is_slower = summary
                .slowest
                .as_ref()
                .is_none_or(|slowest| entry.duration_ms() > slowest.duration_ms());
            if is_slower {
                summary.slowest = Some(entry.clone());
            }
        }
        summary.total_duration_ms = round_hundredths(summary.total_duration_ms);

        summary
    }
}
