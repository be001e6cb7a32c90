//! CSV snapshot of the destination table

use super::{Database, schema};
use crate::etl::Exporter;
use chrono::{DateTime, NaiveDateTime, Utc};
use eyre::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::Type;

/// Default export file name
pub const DEFAULT_EXPORT_PATH: &str = "covid_summary.csv";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A result set rendered to text, ready to be written as CSV
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub header: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl Snapshot {
    /// Render query rows using the statement's column metadata
    ///
    /// NULL becomes an empty field. Row order is whatever the query
    /// returned.
    pub fn from_rows(columns: &[tokio_postgres::Column], rows: &[Row]) -> Result<Self> {
        let header = columns.iter().map(|c| c.name().to_string()).collect();
        let records = rows
            .iter()
            .map(|row| {
                (0..columns.len())
                    .map(|idx| render_cell(row, idx, columns[idx].type_()))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { header, records })
    }

    /// Write header and records to `path`, replacing any existing file
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        writer
            .write_record(&self.header)
            .with_context(|| format!("Failed to write CSV header: {}", path.display()))?;
        for record in &self.records {
            writer
                .write_record(record)
                .with_context(|| format!("Failed to write CSV record: {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;
        Ok(())
    }
}

fn render_cell(row: &Row, idx: usize, ty: &Type) -> Result<String> {
    let column = row.columns()[idx].name();
    let text = match ty.name() {
        "text" | "varchar" | "bpchar" | "name" => row.try_get::<_, Option<String>>(idx)?,
        "int2" => row.try_get::<_, Option<i16>>(idx)?.map(|v| v.to_string()),
        "int4" => row.try_get::<_, Option<i32>>(idx)?.map(|v| v.to_string()),
        "int8" => row.try_get::<_, Option<i64>>(idx)?.map(|v| v.to_string()),
        "float4" => row.try_get::<_, Option<f32>>(idx)?.map(|v| v.to_string()),
        "float8" => row.try_get::<_, Option<f64>>(idx)?.map(|v| v.to_string()),
        "bool" => row.try_get::<_, Option<bool>>(idx)?.map(|v| v.to_string()),
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(|v| v.format(TIMESTAMP_FORMAT).to_string()),
        "timestamptz" => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|v| v.naive_utc().format(TIMESTAMP_FORMAT).to_string()),
        other => eyre::bail!("Unsupported column type '{}' for column '{}'", other, column),
    };
    Ok(text.unwrap_or_default())
}

/// Exporter that reads back `covid_stats` into a CSV file
///
/// Uses the same session as the loader and closes it when the pipeline
/// finishes.
pub struct CsvExporter {
    db: Arc<Database>,
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(db: Arc<Database>, path: impl AsRef<Path>) -> Self {
        Self {
            db,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn query(&self) -> Result<Snapshot> {
        let client = self.db.client().await?;
        let statement = client
            .prepare(schema::SELECT_ALL)
            .await
            .with_context(|| format!("Failed to query {}", schema::TABLE))?;
        let rows = client
            .query(&statement, &[])
            .await
            .with_context(|| format!("Failed to query {}", schema::TABLE))?;
        Snapshot::from_rows(statement.columns(), &rows)
    }
}

impl Exporter for CsvExporter {
    async fn export(&self) -> Result<usize> {
        let snapshot = self.query().await?;
        snapshot.write(&self.path)?;
        log::info!("Export summary to {}", self.path.display());
        Ok(snapshot.records.len())
    }

    async fn finish(&self) -> Result<()> {
        self.db.close().await
    }
}
