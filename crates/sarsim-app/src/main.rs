use std::path::PathBuf;

use clap::Parser;

use sarsim_app::config::SimConfig;
use sarsim_app::driver;
use sarsim_app::logging::init_logging;

/// Sequential Bayesian search-and-rescue exercise.
#[derive(Debug, Parser)]
#[command(
    name = "sarsim",
    author,
    version,
    about = "Bayesian search-and-rescue simulator"
)]
struct Cli {
    /// Path to the YAML configuration file (built-in defaults when omitted).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the session RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Run a comma-separated list of menu choices non-interactively.
    #[arg(long, value_name = "CHOICES")]
    plan: Option<String>,

    /// Exit after validating the configuration (no session is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;

    if cli.validate_only {
        println!("Configuration OK.");
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    match &cli.plan {
        Some(plan) => driver::run_plan(&config, plan, &mut stdout),
        None => {
            let stdin = std::io::stdin();
            driver::run_interactive(&config, &mut stdin.lock(), &mut stdout)
        }
    }
}
