use anyhow::Result;
use clap::Subcommand;
use examplan_configuration::PlannerConfiguration;

pub mod easter;
pub mod holidays;
pub mod plan;

use self::plan::PlanArguments;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan the exam periods and write the report, calendar and JSON files
    Plan {
        #[command(flatten)]
        plan_arguments: PlanArguments,
    },
    /// List the holidays the planner uses for a year
    Holidays {
        #[arg(long)]
        year: i32,
    },
    /// Show Easter and the carnival dates of a year
    Easter {
        #[arg(long)]
        year: i32,
    },
}

pub fn handle_command(command: Commands, planner_configuration: PlannerConfiguration) -> Result<()> {
    match command {
        Commands::Plan { plan_arguments } => plan::execute(plan_arguments, planner_configuration),
        Commands::Holidays { year } => holidays::execute(year, &planner_configuration),
        Commands::Easter { year } => easter::execute(year),
    }
}
