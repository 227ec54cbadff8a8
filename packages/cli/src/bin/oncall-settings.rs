use clap::{Parser, Subcommand};
use colored::*;
use std::process;

use oncall_cli::{commands, init_logging, AppContext};
use oncall_core::EngineConfig;

#[derive(Parser)]
#[command(name = "oncall-settings")]
#[command(about = "Inspect, validate, and update OnCall live settings")]
#[command(version)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every known setting with its value and last error
    List,
    /// Print the value of a setting
    Get {
        /// Setting name (case-insensitive)
        name: String,
    },
    /// Validate and store a new value
    Set {
        /// Setting name (case-insensitive)
        name: String,
        /// New value
        value: String,
        /// Store the value even if validation fails
        #[arg(long)]
        force: bool,
        /// Parse the value as JSON (true, 42, null, ...)
        #[arg(long)]
        json: bool,
    },
    /// Validate a candidate value, or the stored value when none is given
    Validate {
        /// Setting name (case-insensitive)
        name: String,
        /// Candidate value
        value: Option<String>,
        /// Parse the value as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-validate all stored settings and record the results
    Check,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(2);
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<bool> {
    let config = EngineConfig::from_env()?;
    let ctx = AppContext::open(config).await?;

    let outcome = match command {
        Commands::List => commands::list(&ctx).await,
        Commands::Get { name } => commands::get(&ctx, &name).await,
        Commands::Set {
            name,
            value,
            force,
            json,
        } => commands::set(&ctx, &name, &value, force, json).await,
        Commands::Validate { name, value, json } => {
            commands::validate(&ctx, &name, value.as_deref(), json).await
        }
        Commands::Check => commands::check(&ctx).await,
    };

    ctx.db.close().await;
    outcome
}
