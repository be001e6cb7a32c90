//! PostgreSQL and file storage
//!
//! This module handles everything the pipeline writes:
//! - the lazily opened database session
//! - the `covid_stats` table loader
//! - the CSV snapshot exporter

mod database;
mod loader;
pub mod schema;
mod snapshot;

pub use database::Database;
pub use loader::StatsTableLoader;
pub use snapshot::{CsvExporter, DEFAULT_EXPORT_PATH, Snapshot};
