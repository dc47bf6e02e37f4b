pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use commands::Commands;
use examplan_configuration::PlannerConfiguration;
use examplan_orchestrator::logging::setup_logging;
use tracing::Level;
use tracing::event;

#[derive(Parser)]
#[command(name = "examplan", author, version, about, long_about = None)]
pub struct Cli {
    /// Planner configuration. Falls back to $EXAMPLAN_CONFIGURATION, then to
    /// the built-in TH Köln rules.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{} {:?}", "error:".bright_red().bold(), error);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let _log_guards = setup_logging()?;
    let planner_configuration = PlannerConfiguration::resolve(cli.config.as_deref())?;
    event!(Level::DEBUG, ?planner_configuration, "planner configuration resolved");

    commands::handle_command(cli.command, planner_configuration)
}
