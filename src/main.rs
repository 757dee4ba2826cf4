//! CLI entry point for the status page uptime report.
//!
//! Fetches the component summary and incident history from a Statuspage v2
//! API, folds incidents into per-day downtime, and prints uptime per component.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use statuspage_uptime::config::{Settings, SettingsArgs};
use statuspage_uptime::downtime::{Target, aggregate};
use statuspage_uptime::fetch::BasicClient;
use statuspage_uptime::infra::statuspage::StatuspageClient;
use statuspage_uptime::output::{
    print_pretty, write_csv, write_day_map, write_incidents, write_json, write_text,
    write_uptime_table,
};
use statuspage_uptime::report::build_report;
use statuspage_uptime::services::{StatusSnapshot, load_snapshot};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "statuspage_uptime")]
#[command(about = "Per-component uptime from a status page's incident history", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Read the summary from this file or URL instead of the API
    #[arg(long, global = true, value_name = "FILE_OR_URL")]
    summary: Option<String>,

    /// Read incidents from this file or URL instead of the API
    #[arg(long, global = true, value_name = "FILE_OR_URL")]
    incidents: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full report: status banner, uptime per component, incidents
    Report {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print only the uptime table
    Uptime {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print only the incident list
    Incidents {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Dump the day map of one component (or `overall`) as JSON
    DayMap {
        /// Component id, or `overall`
        #[arg(short, long)]
        component: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/statuspage_uptime.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("statuspage_uptime.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from(cli.settings);
    settings.validate()?;

    let snapshot = match fetch_snapshot(&settings, cli.summary, cli.incidents).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = ?e, "Failed to load status data");
            anyhow::bail!("Failed to load status data");
        }
    };

    let stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Report { format } => {
            let report = build_report(&snapshot, settings.now, settings.window_days);
            print_pretty(&report);
            match format {
                Format::Text => write_text(stdout, &report)?,
                Format::Json => write_json(stdout, &report)?,
                Format::Csv => write_csv(stdout, &report)?,
            }
        }
        Commands::Uptime { format } => {
            let report = build_report(&snapshot, settings.now, settings.window_days);
            match format {
                Format::Text => write_uptime_table(stdout, &report)?,
                Format::Json => {
                    let rows: Vec<_> = report.rows().collect();
                    write_json(stdout, &rows)?
                }
                Format::Csv => write_csv(stdout, &report)?,
            }
        }
        Commands::Incidents { format } => {
            let report = build_report(&snapshot, settings.now, settings.window_days);
            match format {
                Format::Json => write_json(stdout, &report.incidents)?,
                Format::Text | Format::Csv => write_incidents(stdout, &report)?,
            }
        }
        Commands::DayMap { component } => {
            let maps = aggregate(
                &snapshot.incidents,
                snapshot.components(),
                settings.now,
                settings.window_days,
            );
            let target = if component == "overall" {
                Target::Overall
            } else {
                Target::component(component.as_str())
            };
            let day_map = maps
                .get(&target)
                .with_context(|| format!("Unknown component '{component}'"))?;
            write_day_map(stdout, day_map)?;
        }
    }

    Ok(())
}

/// Fetches summary and incidents concurrently from the API or local overrides.
#[tracing::instrument(skip(settings), fields(api_base = %settings.api_base))]
async fn fetch_snapshot(
    settings: &Settings,
    summary: Option<String>,
    incidents: Option<String>,
) -> Result<StatusSnapshot> {
    let http = BasicClient::with_timeout(settings.timeout)?;
    let mut client = StatuspageClient::new(http, &settings.api_base);
    if let Some(source) = summary {
        client = client.with_summary_source(source);
    }
    if let Some(source) = incidents {
        client = client.with_incidents_source(source);
    }

    info!(
        summary = client.summary_source(),
        incidents = client.incidents_source(),
        window_days = settings.window_days,
        "Loading status data"
    );
    load_snapshot(&client).await
}
