//! Run configuration
//!
//! Resolved from environment variables (after the optional dotenv file has
//! been sourced by the binary), then adjusted by command line overrides.

use crate::covid::DEFAULT_API_URL;
use crate::storage::DEFAULT_EXPORT_PATH;
use eyre::{Context, OptionExt, Result};
use std::path::PathBuf;
use url::Url;

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "covid_etl.log";

/// Everything one run needs
#[derive(Debug, Clone)]
pub struct Config {
    /// Statistics endpoint
    pub api_url: Url,
    /// Database connection settings
    pub database: tokio_postgres::Config,
    /// Log file, appended to
    pub log_file: PathBuf,
    /// CSV export, overwritten
    pub export_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - COVID_API_URL: statistics endpoint (optional, defaults to disease.sh)
    /// - DATABASE_URL: full connection string (optional, overrides DB_*)
    /// - DB_HOST: database host (optional, defaults to localhost)
    /// - DB_PORT: database port (optional, defaults to 5432)
    /// - DB_NAME: database name (required without DATABASE_URL)
    /// - DB_USER: database user (required without DATABASE_URL)
    /// - DB_PASSWORD: database password (optional)
    /// - COVID_LOG_FILE: log file (optional, defaults to covid_etl.log)
    /// - COVID_EXPORT_PATH: CSV export (optional, defaults to covid_summary.csv)
    pub fn from_env() -> Result<Self> {
        let url_str = var("COVID_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url =
            Url::parse(&url_str).with_context(|| format!("Invalid COVID_API_URL: {}", url_str))?;

        Ok(Self {
            api_url,
            database: database_from_env()?,
            log_file: var("COVID_LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
            export_path: var("COVID_EXPORT_PATH")
                .unwrap_or_else(|| DEFAULT_EXPORT_PATH.to_string())
                .into(),
        })
    }

    pub fn with_api_url(mut self, url: Option<Url>) -> Self {
        if let Some(url) = url {
            self.api_url = url;
        }
        self
    }

    pub fn with_export_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.export_path = path;
        }
        self
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.log_file = path;
        }
        self
    }
}

/// Non-empty environment variable
fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn database_from_env() -> Result<tokio_postgres::Config> {
    if let Some(url) = var("DATABASE_URL") {
        return url
            .parse()
            .with_context(|| "Invalid DATABASE_URL connection string");
    }

    let name = var("DB_NAME").ok_or_eyre("DB_NAME environment variable not set")?;
    let user = var("DB_USER").ok_or_eyre("DB_USER environment variable not set")?;
    let host = var("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = match var("DB_PORT") {
        Some(port) => port
            .parse::<u16>()
            .with_context(|| format!("Invalid DB_PORT: {}", port))?,
        None => 5432,
    };

    let mut config = tokio_postgres::Config::new();
    config.host(&host).port(port).dbname(&name).user(&user);
    if let Some(password) = var("DB_PASSWORD") {
        config.password(password);
    }
    Ok(config)
}
