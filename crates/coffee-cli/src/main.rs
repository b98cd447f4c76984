mod clock;
mod config;
mod view;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use coffee_core::{BedtimeSpec, Dose};

use crate::config::Config;
use crate::view::{Mode, Report};

#[derive(Parser)]
#[command(
    name = "coffee",
    about = "How much caffeine will still be in your blood at bedtime?"
)]
struct Cli {
    /// Config file (default: $COFFEE_CONFIG or ~/.coffee-o-clock/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One cup of coffee (90mg) right now, bed at midnight
    Regular {
        /// Evaluate at this time instead of the current clock
        #[arg(long)]
        now: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Custom dose and bedtime
    Estimate {
        /// Caffeine dose in milligrams
        #[arg(long)]
        dose: Option<f64>,

        /// Bedtime hour, e.g. 12AM or 10PM
        #[arg(long)]
        bedtime: Option<BedtimeSpec>,

        /// Evaluate at this time instead of the current clock
        #[arg(long)]
        now: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the current time and a live estimate, refreshed every tick
    Watch {
        /// Display mode (default: custom if --dose or --bedtime is given,
        /// otherwise the configured mode)
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Caffeine dose in milligrams (custom mode)
        #[arg(long)]
        dose: Option<f64>,

        /// Bedtime hour (custom mode)
        #[arg(long)]
        bedtime: Option<BedtimeSpec>,

        /// Refresh period in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// List the selectable bedtimes
    Bedtimes,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Regular { now, json } => cmd_regular(now.as_deref(), *json),
        Commands::Estimate {
            dose,
            bedtime,
            now,
            json,
        } => cmd_estimate(&cli, *dose, *bedtime, now.as_deref(), *json),
        Commands::Watch {
            mode,
            dose,
            bedtime,
            interval_ms,
            ticks,
        } => cmd_watch(&cli, *mode, *dose, *bedtime, *interval_ms, *ticks).await,
        Commands::Bedtimes => cmd_bedtimes(),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    Config::load(cli.config.as_deref()).context("failed to load config")
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Local>> {
    match raw {
        Some(raw) => clock::parse_now(raw).context("invalid --now"),
        None => Ok(Local::now()),
    }
}

fn resolve_dose(flag: Option<f64>, config: &Config) -> Result<Dose> {
    match flag {
        Some(mg) => Dose::new(mg).context("invalid --dose"),
        None => Ok(config.dose_mg),
    }
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(report).context("failed to serialize result")?;
        println!("{out}");
    } else {
        print!("{}", report.render());
    }
    Ok(())
}

fn cmd_regular(now: Option<&str>, json: bool) -> Result<()> {
    let now = resolve_now(now)?;
    let report = Report::evaluate(Mode::Regular, Dose::cup_of_coffee(), BedtimeSpec::default(), &now)?;
    print_report(&report, json)
}

fn cmd_estimate(
    cli: &Cli,
    dose: Option<f64>,
    bedtime: Option<BedtimeSpec>,
    now: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = load_config(cli)?;
    let now = resolve_now(now)?;
    let dose = resolve_dose(dose, &config)?;
    let bedtime = bedtime.unwrap_or(config.bedtime);

    let report = Report::evaluate(Mode::Custom, dose, bedtime, &now)?;
    print_report(&report, json)
}

async fn cmd_watch(
    cli: &Cli,
    mode: Option<Mode>,
    dose: Option<f64>,
    bedtime: Option<BedtimeSpec>,
    interval_ms: Option<u64>,
    ticks: Option<u64>,
) -> Result<()> {
    let config = load_config(cli)?;
    let custom_inputs = dose.is_some() || bedtime.is_some();
    let mode = match mode {
        Some(Mode::Regular) if custom_inputs => {
            tracing::warn!("regular mode uses one cup at 12AM; ignoring --dose/--bedtime");
            Mode::Regular
        }
        Some(mode) => mode,
        None if custom_inputs => Mode::Custom,
        None => config.mode,
    };
    let dose = resolve_dose(dose, &config)?;
    let bedtime = bedtime.unwrap_or(config.bedtime);
    let interval = Duration::from_millis(interval_ms.unwrap_or(config.interval_ms));

    clock::watch(mode, dose, bedtime, interval, ticks).await
}

fn cmd_bedtimes() -> Result<()> {
    for spec in BedtimeSpec::all() {
        println!("{:<5} {}", spec.to_string(), spec.label());
    }
    Ok(())
}
