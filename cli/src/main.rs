//! MGT replay runner: sequences scripted operations against a fresh token.

mod config;
mod runner;
mod script;

use anyhow::Context;
use clap::Parser;
use config::RunnerConfig;
use mgt_utils::LogFormat;
use runner::Runner;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mgt", about = "Replay governance-token operations and query voting power")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "MGT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "MGT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "MGT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Execute a JSON script, printing one JSON outcome per step.
    Replay {
        /// Script file: a JSON array of steps.
        script: PathBuf,

        /// Stop at the first failed step and exit non-zero.
        #[arg(long)]
        fail_fast: bool,
    },
    /// Print the default configuration as TOML.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunnerConfig::from_toml_file(path)?,
        None => RunnerConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    mgt_utils::init_logging(config.log_format, &config.log_level)
        .context("initialising logging")?;

    match cli.command {
        Command::InitConfig => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Replay { script, fail_fast } => {
            let steps = script::load_script(&script)?;
            tracing::info!(
                steps = steps.len(),
                owner = %config.owner,
                start_unit = config.start_unit,
                "replaying {}",
                script.display()
            );

            let mut runner = Runner::new(&config);
            let outcomes = runner.run(&steps, fail_fast);

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for outcome in &outcomes {
                serde_json::to_writer(&mut out, outcome)?;
                writeln!(out)?;
            }

            let failures = outcomes.iter().filter(|o| o.is_failure()).count();
            tracing::info!(
                applied = outcomes.len(),
                failures,
                supply = runner.token().total_supply(),
                "replay finished"
            );
            if fail_fast && failures > 0 {
                anyhow::bail!("replay stopped after a failed step");
            }
        }
    }
    Ok(())
}
