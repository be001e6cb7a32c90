//! Integration tests for the pipeline against a local HTTP endpoint
//!
//! None of these need PostgreSQL; the database is either never reached or
//! deliberately unreachable.

mod common;

use covid_etl::client::StatsClient;
use covid_etl::covid::{ApiExtractor, StatRowTransformer};
use covid_etl::etl::{Extractor, Pipeline, State};
use covid_etl::storage::{CsvExporter, Database, StatsTableLoader};
use covid_etl::EtlError;
use eyre::Result;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

fn pipeline(
    url: Url,
    db: Arc<Database>,
    export: &Path,
) -> Result<Pipeline<ApiExtractor, StatRowTransformer, StatsTableLoader, CsvExporter>> {
    Ok(Pipeline::new(
        ApiExtractor::new(StatsClient::try_new(url)?),
        StatRowTransformer,
        StatsTableLoader::new(db.clone()),
        CsvExporter::new(db, export),
    ))
}

#[tokio::test]
async fn test_extract_records_in_order() -> Result<()> {
    let url = common::serve("200 OK", common::SEVERAL_COUNTRIES, 1).await;
    let extractor = ApiExtractor::new(StatsClient::try_new(url)?);

    let records = extractor.extract().await?;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["country"], "Andorra");
    assert_eq!(records[2]["country"], "Chad");
    Ok(())
}

#[tokio::test]
async fn test_extract_http_error() -> Result<()> {
    let url = common::serve("500 Internal Server Error", r#"{"message":"boom"}"#, 1).await;
    let extractor = ApiExtractor::new(StatsClient::try_new(url)?);

    let err = extractor.extract().await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("500"), "unexpected error: {}", message);
    Ok(())
}

#[tokio::test]
async fn test_extract_rejects_non_array_body() -> Result<()> {
    let url = common::serve("200 OK", r#"{"message":"Country not found"}"#, 1).await;
    let extractor = ApiExtractor::new(StatsClient::try_new(url)?);

    let err = extractor.extract().await.unwrap_err();
    assert!(err.to_string().contains("Expected a JSON array"));
    Ok(())
}

#[tokio::test]
async fn test_extract_connection_refused() -> Result<()> {
    let url = Url::parse("http://127.0.0.1:1/v3/covid-19/countries")?;
    let extractor = ApiExtractor::new(StatsClient::try_new(url)?);

    assert!(extractor.extract().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_http_failure_never_touches_database() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let export = temp_dir.path().join("covid_summary.csv");
    let url = common::serve("500 Internal Server Error", "", 1).await;
    let db = Arc::new(Database::from_url(common::UNREACHABLE_DATABASE)?);

    let report = pipeline(url, db.clone(), &export)?.run().await;

    assert_eq!(report.state, State::Started);
    assert!(matches!(report.failures[..], [EtlError::Network(_)]));
    assert!(!db.is_connected().await);
    assert!(!export.exists());
    Ok(())
}

#[tokio::test]
async fn test_empty_response_stops_after_transform() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let export = temp_dir.path().join("covid_summary.csv");
    let url = common::serve("200 OK", "[]", 1).await;
    let db = Arc::new(Database::from_url(common::UNREACHABLE_DATABASE)?);

    let report = pipeline(url, db, &export)?.run().await;

    assert_eq!(report.state, State::Transformed);
    assert_eq!(report.extracted, 0);
    assert_eq!(report.transformed, 0);
    assert!(!report.has_failures());
    assert!(!export.exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_updated_fails_whole_batch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let export = temp_dir.path().join("covid_summary.csv");
    let body = r#"[{"country":"A","updated":1700000000000},{"country":"B","cases":3}]"#;
    let url = common::serve("200 OK", body, 1).await;
    let db = Arc::new(Database::from_url(common::UNREACHABLE_DATABASE)?);

    let report = pipeline(url, db, &export)?.run().await;

    assert_eq!(report.state, State::Transformed);
    assert_eq!(report.extracted, 2);
    assert_eq!(report.transformed, 0);
    assert!(matches!(report.failures[..], [EtlError::Transform(_)]));
    Ok(())
}

#[tokio::test]
async fn test_database_failure_runs_load_and_export() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let export = temp_dir.path().join("covid_summary.csv");
    let url = common::serve("200 OK", common::SINGLE_COUNTRY, 1).await;
    let db = Arc::new(Database::from_url(common::UNREACHABLE_DATABASE)?);

    let report = pipeline(url, db.clone(), &export)?.run().await;

    assert_eq!(report.state, State::Exported);
    assert_eq!(report.transformed, 1);
    assert_eq!(report.loaded, None);
    assert_eq!(report.exported, None);
    assert!(matches!(
        report.failures[..],
        [EtlError::Database(_), EtlError::Export(_)]
    ));
    assert!(!db.is_connected().await);
    assert!(!export.exists());
    Ok(())
}
