use chrono::{DateTime, Utc};

/// One element of the API response, untouched
pub type RawRecord = serde_json::Value;

/// Ordered rows of one run, in API response order
pub type StatTable = Vec<StatRow>;

/// A normalized country record
///
/// Every field but `updated` degrades to `None` when the source record lacks
/// it or carries something unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub country: Option<String>,
    pub cases: Option<i64>,
    pub deaths: Option<i64>,
    pub recovered: Option<i64>,
    pub population: Option<i64>,
    /// Source timestamp, converted from epoch milliseconds
    pub updated: DateTime<Utc>,
}

impl StatRow {
    /// Name used in log lines, `<unknown>` when absent
    pub fn label(&self) -> &str {
        self.country.as_deref().unwrap_or("<unknown>")
    }
}
