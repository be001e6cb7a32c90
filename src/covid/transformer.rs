//! Raw record to [`StatRow`] conversion

use super::{RawRecord, StatRow};
use crate::etl::Transformer;
use chrono::{DateTime, Utc};
use eyre::{OptionExt, Result, WrapErr, eyre};
use serde_json::Value;

/// Normalizes raw API records into [`StatRow`]s
///
/// `updated` is the only required key. Used through
/// [`Transformer::transform_many`], a single bad record fails the whole
/// batch.
///
/// # Example
/// ```
/// use covid_etl::covid::StatRowTransformer;
/// use covid_etl::etl::Transformer;
/// use serde_json::json;
///
/// let row = StatRowTransformer
///     .transform(json!({"country": "X", "cases": 10, "updated": 1700000000000_i64}))
///     .unwrap();
/// assert_eq!(row.cases, Some(10));
/// assert_eq!(row.deaths, None);
/// assert_eq!(row.updated.to_rfc3339(), "2023-11-14T22:13:20+00:00");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StatRowTransformer;

impl Transformer for StatRowTransformer {
    type Input = RawRecord;
    type Output = StatRow;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let record = input
            .as_object()
            .ok_or_else(|| eyre!("Record is not a JSON object: {}", input))?;

        let country = record
            .get("country")
            .and_then(Value::as_str)
            .map(str::to_string);

        let updated = record.get("updated").ok_or_else(|| {
            eyre!(
                "Record for {} is missing required field 'updated'",
                country.as_deref().unwrap_or("<unknown>")
            )
        })?;
        let updated = epoch_millis(updated).wrap_err_with(|| {
            format!(
                "Invalid record for {}",
                country.as_deref().unwrap_or("<unknown>")
            )
        })?;

        Ok(StatRow {
            cases: record.get("cases").and_then(integer),
            deaths: record.get("deaths").and_then(integer),
            recovered: record.get("recovered").and_then(integer),
            population: record.get("population").and_then(integer),
            country,
            updated,
        })
    }
}

/// Integer value of a JSON number, accepting integral floats
fn integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

fn epoch_millis(value: &Value) -> Result<DateTime<Utc>> {
    let millis = integer(value)
        .ok_or_else(|| eyre!("'updated' is not an epoch millisecond value: {}", value))?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_eyre(format!("'updated' value {} is out of range", millis))
}
