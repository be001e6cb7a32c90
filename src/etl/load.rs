//! Loader trait for loading data to destinations

use eyre::Result;

/// Loader trait for writing normalized rows to a destination
///
/// # Example
/// ```no_run
/// use covid_etl::etl::Loader;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LineLoader {
///     path: PathBuf,
/// }
///
/// impl Loader for LineLoader {
///     type Item = String;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
///         std::fs::write(&self.path, items.join("\n"))?;
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// Returns the number of items written
    ///
    /// # Errors
    /// Returns an error if loading fails (connection, DDL, insert, commit)
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
