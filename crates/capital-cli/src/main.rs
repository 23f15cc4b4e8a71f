/*
[INPUT]:  CLI arguments, YAML configuration file, CAPITAL_* environment variables
[OUTPUT]: Pretty-printed JSON result of one Capital.com operation
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use capital_adapter::CapitalClient;
use capital_cli::{CliConfig, Command, run};

#[derive(Parser, Debug)]
#[command(name = "capital", version, about = "Capital.com REST API command-line client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Force the demo environment regardless of the config file
    #[arg(long = "demo")]
    demo: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    info!(config_path = %args.config_path.display(), "starting capital");

    let mut config = load_config(&args.config_path)?;
    config.apply_env_overrides();
    if args.demo {
        config.demo = true;
    }
    info!(environment = %config.environment(), "configuration loaded");

    let client =
        CapitalClient::with_config(config.client_config()).context("create capital client")?;
    let output = run(&client, &config, args.command).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("render output")?
    );
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}
