//! SQL for the `covid_stats` destination table

/// Destination table, rebuilt on every run
pub const TABLE: &str = "covid_stats";

/// Column order shared by DDL, inserts and the exported header
pub const COLUMNS: [&str; 6] = [
    "country",
    "cases",
    "deaths",
    "recovered",
    "population",
    "updated",
];

pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS covid_stats";

#[rustfmt::skip]
pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS covid_stats (
    country     TEXT,
    cases       INTEGER,
    deaths      INTEGER,
    recovered   INTEGER,
    population  INTEGER,
    updated     TIMESTAMP
)";

#[rustfmt::skip]
pub const INSERT_ROW: &str =
    "INSERT INTO covid_stats (country, cases, deaths, recovered, population, updated) \
     VALUES                  ($1,      $2,    $3,     $4,        $5,         $6)";

pub const SELECT_ALL: &str = "SELECT * FROM covid_stats";
