//! Extractor trait for pulling raw records from a source

use eyre::Result;

/// Extractor trait for extracting data from a source
///
/// Implementors define where raw records come from, such as a REST
/// endpoint or a file on disk.
///
/// # Example
/// ```no_run
/// use covid_etl::etl::Extractor;
/// use eyre::Result;
/// use serde_json::Value;
/// use std::path::PathBuf;
///
/// struct FileExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for FileExtractor {
///     type Item = Value;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         let content = std::fs::read_to_string(&self.path)?;
///         Ok(serde_json::from_str(&content)?)
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, HTTP status, parsing)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
