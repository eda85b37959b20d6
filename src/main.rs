mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod server;
mod services;
mod workflow;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigCommand};
use crate::config::resolve_config_path;
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "girs",
    author,
    version,
    about = "Mirrors Gitea issues into Redmine tickets"
)]
struct Cli {
    /// Configuration file (defaults to ./config.yml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook server.
    Serve,
    /// Inspect configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config);

    match cli.command {
        Commands::Serve => cmd::serve::run(&config_path).await,
        Commands::Config(args) => config_cmd::run(args.command, &config_path),
    }
}
