//! Statistics API client module
//!
//! Provides `StatsClient`, a reqwest client bound to a single endpoint URL.

use eyre::{Context, Result, eyre};
use reqwest::Client;
use url::Url;

/// Client for the country statistics endpoint.
///
/// The endpoint URL is fixed at construction; each call to [`StatsClient::get`]
/// issues one GET request against it. There are no retries and no request
/// timeout.
///
/// # Example
/// ```no_run
/// use covid_etl::client::StatsClient;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("https://disease.sh/v3/covid-19/countries")?;
/// let client = StatsClient::try_new(url)?;
/// let response = client.get().await?;
/// assert!(response.status().is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StatsClient {
    client: Client,
    url: Url,
}

impl StatsClient {
    /// Create a new client for the given endpoint
    ///
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client cannot
    /// be built
    pub fn try_new(url: Url) -> Result<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            eyre::bail!("Unsupported endpoint scheme '{}' in {}", url.scheme(), url);
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self { client, url })
    }

    /// Get the endpoint URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send one GET request to the endpoint.
    ///
    /// Only transport failures are errors here; the caller decides what to
    /// do with the status code.
    pub async fn get(&self) -> Result<reqwest::Response> {
        log::debug!("GET {}", self.url);
        self.client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request to {}: {}", self.url, e))
    }
}
