//! File-backed log sink
//!
//! Lines look like `2026-10-18T06:00:00.123Z [INFO] Loaded 231 rows into covid_stats`.

use eyre::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Build a logger that appends to `path`
///
/// The level filter comes from `LOG_LEVEL`, falling back to `default_level`.
pub fn builder(path: impl AsRef<Path>, default_level: &str) -> Result<env_logger::Builder> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let env = env_logger::Env::default().filter_or("LOG_LEVEL", default_level);
    let mut builder = env_logger::Builder::from_env(env);
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)));
    Ok(builder)
}

/// Install the file logger as the global logger
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is
/// already installed
pub fn init(path: impl AsRef<Path>, default_level: &str) -> Result<()> {
    builder(path, default_level)?
        .try_init()
        .with_context(|| "Failed to initialize logging")
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use tempfile::TempDir;

    fn emit(logger: &env_logger::Logger, level: log::Level, message: &str) {
        logger.log(
            &log::Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target("covid_etl")
                .build(),
        );
        logger.flush();
    }

    #[test]
    #[serial_test::serial]
    fn test_appends_leveled_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("covid_etl.log");
        std::fs::write(&path, "previous run\n").unwrap();

        unsafe {
            std::env::remove_var("LOG_LEVEL");
        }
        let logger = builder(&path, "info").unwrap().build();
        emit(&logger, log::Level::Info, "Data extracted from API");
        emit(&logger, log::Level::Warn, "No data after transformation");
        emit(&logger, log::Level::Debug, "hidden at info");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "previous run");
        assert!(lines[1].ends_with(" [INFO] Data extracted from API"));
        assert!(lines[2].ends_with(" [WARN] No data after transformation"));
    }

    #[test]
    fn test_unwritable_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("covid_etl.log");
        let err = builder(&path, "info").unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
