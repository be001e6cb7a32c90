use clap::{Parser, builder::styling};
use covid_etl::cli::run_pipeline;
use covid_etl::{Config, PipelineReport, logging};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use url::Url;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Fetch country COVID-19 statistics, reload them into PostgreSQL and export a CSV summary
#[derive(Parser)]
#[command(name = "covid-etl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source database credentials from (skipped if missing)
    #[arg(short, long, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long)]
    debug: bool,

    /// Statistics endpoint, overrides COVID_API_URL
    #[arg(long)]
    url: Option<Url>,

    /// CSV export path, overrides COVID_EXPORT_PATH
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log file path, overrides COVID_LOG_FILE
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Exit non-zero unless every stage ran and succeeded
    #[arg(long)]
    strict: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match dotenvy::from_filename(&cli.env) {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", cli.env)),
    }

    let config = Config::from_env()?
        .with_api_url(cli.url)
        .with_export_path(cli.output)
        .with_log_file(cli.log_file);

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    logging::init(&config.log_file, log_level)?;

    let report = run_pipeline(&config).await?;
    summarize(&config, &report);

    if cli.strict && !report.is_complete() {
        eyre::bail!(
            "Pipeline ended at '{}' with {} failure(s)",
            report.state,
            report.failures.len()
        );
    }
    Ok(())
}

fn summarize(config: &Config, report: &PipelineReport) {
    if report.is_complete() {
        println!(
            "{} {} rows exported to {}",
            "✓".green(),
            report.exported.unwrap_or_default(),
            config.export_path.display().bright_black()
        );
    } else {
        println!(
            "{} ended at '{}', see {}",
            "✗".red(),
            report.state.cyan(),
            config.log_file.display().bright_black()
        );
    }
    for failure in &report.failures {
        println!("  {}", failure.red());
    }
}
