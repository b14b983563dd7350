// SPDX-License-Identifier: GPL-3.0-or-later

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use patinhas::aggregate::{Report, ReportAggregator};
use patinhas::config::Config;
use patinhas::locale::Locale;
use patinhas::report::{ReportMeta, html, json, terminal};
use patinhas::source::remote::RemoteApi;
use patinhas::source::snapshot::SnapshotFile;
use patinhas::source::{FetchError, RecordSource};

#[derive(Parser)]
#[command(
    name = "patinhas",
    about = "Annual adoption and donation reports for animal-welfare NGOs",
    version
)]
struct Cli {
    /// Base URL of the NGO API (overrides the config file)
    #[arg(long, global = true, env = "PATINHAS_API_URL")]
    api_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a yearly report
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },

    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ReportKind {
    /// Adoptions per month, adoption rate and most adopted species
    Adoptions {
        #[command(flatten)]
        args: ReportArgs,

        /// Number of candidate animals to measure the adoption rate against
        /// (defaults to available animals plus those adopted in the year)
        #[arg(long)]
        pool_size: Option<u64>,
    },

    /// Funds and items received per month and most donated items
    Donations {
        #[command(flatten)]
        args: ReportArgs,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Calendar year to report on (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Output format
    #[arg(long, default_value = "terminal")]
    format: ReportFormat,

    /// Read records from a JSON export instead of the API
    #[arg(long)]
    input: Option<PathBuf>,

    /// Maximum number of categories to display (0 for all)
    #[arg(long, default_value = "0")]
    limit: usize,

    /// Language for month names and headings (overrides the config file)
    #[arg(long)]
    locale: Option<Locale>,
}

#[derive(Clone, clap::ValueEnum)]
enum ReportFormat {
    Terminal,
    Json,
    Html,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open configuration file in $EDITOR
    Edit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Report { kind } => cmd_report(&config, cli.api_url.as_deref(), &kind),
        Commands::Config { command } => cmd_config(&config, &command),
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn open_source(
    config: &Config,
    api_url: Option<&str>,
    input: Option<&Path>,
) -> Result<Box<dyn RecordSource>, FetchError> {
    match input {
        Some(path) => Ok(Box::new(SnapshotFile::open(path)?)),
        None => {
            let base_url = api_url.unwrap_or(&config.api.base_url);
            Ok(Box::new(RemoteApi::new(base_url, config.api.timeout())?))
        }
    }
}

fn build_report(
    aggregator: &ReportAggregator,
    source: &dyn RecordSource,
    kind: &ReportKind,
    year: i32,
) -> Result<Report, FetchError> {
    match kind {
        ReportKind::Adoptions { pool_size, .. } => {
            let adoption_year = source.fetch_adoption_year(year)?;
            let pool = pool_size.unwrap_or(adoption_year.candidate_pool);
            info!(
                "Aggregating {} adoptions against a pool of {pool}",
                adoption_year.records.len()
            );
            Ok(Report::Adoptions(
                aggregator.aggregate_adoptions(&adoption_year.records, pool),
            ))
        }
        ReportKind::Donations { .. } => {
            let records = source.fetch_donations_for_year(year)?;
            info!("Aggregating {} donation records", records.len());
            Ok(Report::Donations(aggregator.aggregate_donations(&records)))
        }
    }
}

fn cmd_report(config: &Config, api_url: Option<&str>, kind: &ReportKind) -> Result<()> {
    let args = match kind {
        ReportKind::Adoptions { args, .. } | ReportKind::Donations { args } => args,
    };
    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
    let aggregator = config.report.aggregator(args.locale);
    let locale = aggregator.locale();

    let report = open_source(config, api_url, args.input.as_deref()).and_then(|source| {
        info!("Reading records from {}", source.name());
        build_report(&aggregator, source.as_ref(), kind, year)
    });

    let report = match report {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            eprintln!("No data available for {year}.");
            return Ok(());
        }
    };

    let meta = ReportMeta {
        year,
        locale,
        currency: config.report.currency_symbol.clone(),
    };

    match args.format {
        ReportFormat::Terminal => terminal::print_report(&report, &meta, args.limit),
        ReportFormat::Json => json::print_json(&report, &meta)?,
        ReportFormat::Html => html::print_html(&report, &meta),
    }

    Ok(())
}

fn cmd_config(config: &Config, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => cmd_config_show(config),
        Some(ConfigCommands::Edit) => cmd_config_edit(),
    }
}

fn cmd_config_show(config: &Config) -> Result<()> {
    let path = Config::config_path()?;
    eprintln!("# {}", path.display());

    let toml = toml::to_string_pretty(config).context("Failed to serialize config")?;
    print!("{toml}");
    Ok(())
}

fn cmd_config_edit() -> Result<()> {
    let path = Config::config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    if !path.exists() {
        let default_toml = toml::to_string_pretty(&Config::default())
            .context("Failed to serialize default config")?;
        fs::write(&path, &default_toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        eprintln!("Created default config at {}", path.display());
    }

    let editor = env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor '{editor}'"))?;

    if !status.success() {
        anyhow::bail!("Editor '{editor}' exited with {status}");
    }

    Ok(())
}
