mod diagnostics;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use clockface::picker::model::ClockType;
use clockface::script::{load_session_script, replay};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliClockType {
    #[value(name = "12h")]
    Hour12,
    #[value(name = "24h")]
    Hour24,
}

impl From<CliClockType> for ClockType {
    fn from(value: CliClockType) -> Self {
        match value {
            CliClockType::Hour12 => ClockType::Hour12,
            CliClockType::Hour24 => ClockType::Hour24,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "clockface",
    version,
    about = "Replay clock-face time picker sessions"
)]
struct Cli {
    #[arg(long, default_value = "session.json")]
    script: PathBuf,

    /// Overrides the clock type given in the script.
    #[arg(long, value_enum)]
    clock_type: Option<CliClockType>,

    #[arg(long)]
    diagnostics: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut script = load_session_script(&cli.script)
        .with_context(|| format!("failed to load {}", cli.script.display()))?;
    if let Some(clock_type) = cli.clock_type {
        script.config.clock_type = clock_type.into();
    }

    if cli.diagnostics {
        diagnostics::run_diagnostics(&script)?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = replay(&script, &mut out)?;
    out.flush()?;
    log::info!(
        "replayed {} steps: {} notifications, {} rejected",
        summary.steps,
        summary.notifications,
        summary.rejections
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}
