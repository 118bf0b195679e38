//! balances-sim: replay a scenario of calls against an in-memory ledger.

mod scenario;

use anyhow::Context;
use balances_engine::BalancesConfig;
use balances_utils::{init_logging, LogFormat};
use clap::Parser;
use scenario::Scenario;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "balances-sim", about = "Balances ledger simulator")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "BALANCES_CONFIG")]
    config: Option<PathBuf>,

    /// Existential deposit.
    #[arg(long, env = "BALANCES_EXISTENTIAL_DEPOSIT")]
    existential_deposit: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALANCES_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALANCES_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a scenario file and print the JSON report.
    Run {
        scenario: PathBuf,

        /// Exit with an error if the final state violates an invariant.
        #[arg(long)]
        strict: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BalancesConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BalancesConfig::default(),
    };
    if let Some(ed) = cli.existential_deposit {
        config.existential_deposit = ed;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let format: LogFormat = config.log_format.parse()?;
    init_logging(format, &config.log_level)?;

    match cli.command {
        Command::Run { scenario, strict } => {
            let scenario = Scenario::from_path(&scenario)?;
            let report = scenario.run(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if let (true, Some(violation)) = (strict, &report.invariants) {
                anyhow::bail!("invariant violated: {violation}");
            }
        }
        Command::Config => print!("{}", config.to_toml_string()?),
    }
    Ok(())
}
