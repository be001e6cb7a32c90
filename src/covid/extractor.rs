//! Statistics API extractor
//!
//! Fetches every country record with a single GET against the configured
//! endpoint.

use super::RawRecord;
use crate::client::StatsClient;
use crate::etl::Extractor;
use eyre::{Context, Result};
use serde_json::Value;

/// Extractor for country statistics
///
/// Any transport failure, non-success status or non-array body is an error;
/// there is no pagination and no retry.
///
/// # Example
/// ```no_run
/// use covid_etl::client::StatsClient;
/// use covid_etl::covid::ApiExtractor;
/// use covid_etl::etl::Extractor;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("https://disease.sh/v3/covid-19/countries")?;
/// let extractor = ApiExtractor::new(StatsClient::try_new(url)?);
/// let records = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiExtractor {
    client: StatsClient,
}

impl ApiExtractor {
    /// Create a new extractor
    ///
    /// # Arguments
    /// * `client` - HTTP client bound to the statistics endpoint
    pub fn new(client: StatsClient) -> Self {
        Self { client }
    }

    async fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        let url = self.client.url();
        log::debug!("Fetching statistics from {}", url);

        let response = self
            .client
            .get()
            .await
            .with_context(|| "Failed to fetch API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            eyre::bail!("Failed to fetch API ({}): {}", status, body);
        }

        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))?;

        match body {
            Value::Array(records) => Ok(records),
            other => eyre::bail!(
                "Expected a JSON array from {}, got {}",
                url,
                json_kind(&other)
            ),
        }
    }
}

impl Extractor for ApiExtractor {
    type Item = RawRecord;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        let records = self.fetch_records().await?;
        log::info!("Data extracted from API: {} records", records.len());
        Ok(records)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
