use crate::sql::{leading_word, strip_sql_prefix, top_level_words};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Statement kind of a logged query, as counted by
/// [`QuerySummary`](super::QuerySummary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    /// DDL, `SET`, `SHOW`, and anything unrecognised
    Other,
}

impl QueryType {
    /// Classify a statement by its first word.
    ///
    /// Leading comments and parentheses are skipped. A `WITH` statement is
    /// classified by the first DML word after its common table expressions,
    /// and counts as a select when there is none.
    pub fn from_sql(sql: &str) -> Self {
        let statement = strip_sql_prefix(sql);
        let first = leading_word(statement);
        if let Some(kind) = Self::from_keyword(first) {
            kind
        } else if first.eq_ignore_ascii_case("WITH") {
            top_level_words(statement)
                .into_iter()
                .skip(1)
                .find_map(Self::from_keyword)
                .unwrap_or(QueryType::Select)
        } else {
            QueryType::Other
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        const KEYWORDS: [(&str, QueryType); 4] = [
            ("SELECT", QueryType::Select),
            ("INSERT", QueryType::Insert),
            ("UPDATE", QueryType::Update),
            ("DELETE", QueryType::Delete),
        ];
        KEYWORDS
            .iter()
            .find(|(keyword, _)| word.eq_ignore_ascii_case(keyword))
            .map(|&(_, kind)| kind)
    }
}

/// One successful query execution observed by the proxy.
///
/// Serializes as `{"query": "...", "duration": 1.23}` with the duration in
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    query: String,
    #[serde(rename = "duration")]
    duration_ms: f64,
}

impl QueryLogEntry {
    /// Create an entry, rounding `elapsed` to hundredths of a millisecond.
    pub fn new(query: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            query: query.into(),
            duration_ms: round_millis(elapsed),
        }
    }

    /// The SQL text exactly as passed to the adapter.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Execution time in milliseconds, two decimal places.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Statement kind of the logged SQL.
    pub fn query_type(&self) -> QueryType {
        QueryType::from_sql(&self.query)
    }
}

fn round_millis(elapsed: Duration) -> f64 {
    round_hundredths(elapsed.as_secs_f64() * 1000.0)
}

/// Round a millisecond figure to two decimal places.
pub(crate) fn round_hundredths(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
