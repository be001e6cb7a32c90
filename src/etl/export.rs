//! Exporter trait for snapshotting a destination after loading

use eyre::Result;

/// Exporter trait for reading back a destination and writing a snapshot
///
/// The exporter runs after the loader and owns the end of the run, so it
/// is also where shared resources get released via [`Exporter::finish`].
pub trait Exporter: Send + Sync {
    /// Write the snapshot
    ///
    /// Returns the number of data rows written (header excluded)
    ///
    /// # Errors
    /// Returns an error if the read-back query or the file write fails
    fn export(&self) -> impl std::future::Future<Output = Result<usize>> + Send;

    /// Release anything held for the run
    ///
    /// Called exactly once by the pipeline on every exit path.
    fn finish(&self) -> impl std::future::Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}
