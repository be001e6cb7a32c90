//! CLI helper functions

use crate::{
    client::StatsClient,
    config::Config,
    covid::{ApiExtractor, StatRowTransformer},
    etl::{Pipeline, PipelineReport},
    storage::{CsvExporter, Database, StatsTableLoader},
};
use eyre::{Context, Result};
use std::sync::Arc;

/// Assemble the pipeline for a configuration
///
/// Pipeline: ApiExtractor → StatRowTransformer → StatsTableLoader → CsvExporter
///
/// Nothing touches the network or the database until the pipeline runs.
pub fn build_pipeline(
    config: &Config,
) -> Result<Pipeline<ApiExtractor, StatRowTransformer, StatsTableLoader, CsvExporter>> {
    let client =
        StatsClient::try_new(config.api_url.clone()).context("Failed to create API client")?;
    let db = Arc::new(Database::new(config.database.clone()));

    Ok(Pipeline::new(
        ApiExtractor::new(client),
        StatRowTransformer,
        StatsTableLoader::new(db.clone()),
        CsvExporter::new(db, &config.export_path),
    ))
}

/// Run one extract → transform → load → export cycle
///
/// Stage failures are logged and returned in the report; only a pipeline
/// that cannot be assembled is an error.
pub async fn run_pipeline(config: &Config) -> Result<PipelineReport> {
    log::info!("Fetching statistics from {}", config.api_url);
    let pipeline = build_pipeline(config)?;
    let report = pipeline.run().await;
    log::info!("{}", ".".repeat(64));
    Ok(report)
}
