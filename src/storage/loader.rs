//! `covid_stats` table loader
//!
//! Replaces the table contents with the rows of the current run.

use super::{Database, schema};
use crate::covid::StatRow;
use crate::etl::Loader;
use eyre::{Context, Result, eyre};
use std::sync::Arc;

/// Loader for the `covid_stats` table
///
/// One transaction drops and recreates the table, inserts every row in
/// order and commits. If anything fails the transaction is dropped
/// uncommitted and the server rolls it back, leaving the previous contents
/// in place.
///
/// # Example
/// ```no_run
/// use covid_etl::covid::StatRow;
/// use covid_etl::etl::Loader;
/// use covid_etl::storage::{Database, StatsTableLoader};
/// use std::sync::Arc;
///
/// # async fn example(rows: Vec<StatRow>) -> eyre::Result<()> {
/// let db = Arc::new(Database::from_url("postgresql://etl@localhost/covid")?);
/// let loader = StatsTableLoader::new(db.clone());
/// let count = loader.load(rows).await?;
/// db.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct StatsTableLoader {
    db: Arc<Database>,
}

impl StatsTableLoader {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn replace_table(&self, rows: &[StatRow]) -> Result<usize> {
        let mut client = self.db.client().await?;
        let tx = client
            .transaction()
            .await
            .with_context(|| "Failed to begin transaction")?;

        tx.batch_execute(schema::DROP_TABLE)
            .await
            .with_context(|| format!("Failed to drop {}", schema::TABLE))?;
        tx.batch_execute(schema::CREATE_TABLE)
            .await
            .with_context(|| format!("Failed to create {}", schema::TABLE))?;

        let insert = tx
            .prepare(schema::INSERT_ROW)
            .await
            .with_context(|| "Failed to prepare insert")?;
        for (i, row) in rows.iter().enumerate() {
            let cases = integer_column(row, "cases", row.cases)?;
            let deaths = integer_column(row, "deaths", row.deaths)?;
            let recovered = integer_column(row, "recovered", row.recovered)?;
            let population = integer_column(row, "population", row.population)?;
            let updated = row.updated.naive_utc();
            tx.execute(
                &insert,
                &[
                    &row.country,
                    &cases,
                    &deaths,
                    &recovered,
                    &population,
                    &updated,
                ],
            )
            .await
            .with_context(|| format!("Failed to insert row {} ({})", i, row.label()))?;
        }

        tx.commit()
            .await
            .with_context(|| "Failed to commit transaction")?;
        Ok(rows.len())
    }
}

impl Loader for StatsTableLoader {
    type Item = StatRow;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        let count = self
            .replace_table(&items)
            .await
            .with_context(|| "Error loading data to PostgreSQL")?;
        log::info!("Loaded {} rows into {}", count, schema::TABLE);
        Ok(count)
    }
}

/// Narrow a count to the table's `INTEGER` columns
fn integer_column(row: &StatRow, column: &str, value: Option<i64>) -> Result<Option<i32>> {
    value
        .map(|v| {
            i32::try_from(v).map_err(|_| {
                eyre!(
                    "{} = {} for {} is out of range for an INTEGER column",
                    column,
                    v,
                    row.label()
                )
            })
        })
        .transpose()
}
