//! COVID-19 statistics ETL
//!
//! Pulls country-level statistics from a REST endpoint, replaces the
//! `covid_stats` table in PostgreSQL with them and writes a CSV snapshot.

pub mod cli;
pub mod client;
pub mod config;
pub mod covid;
pub mod error;
pub mod etl;
pub mod logging;
pub mod storage;

// Re-exports for convenience
pub use client::StatsClient;
pub use config::Config;
pub use covid::{ApiExtractor, StatRow, StatRowTransformer, StatTable};
pub use error::EtlError;
pub use etl::{Exporter, Extractor, Loader, Pipeline, PipelineReport, State, Transformer};
pub use storage::{CsvExporter, Database, StatsTableLoader};
