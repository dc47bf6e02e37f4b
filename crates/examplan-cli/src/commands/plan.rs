use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::Local;
use chrono::NaiveDate;
use clap::Args;
use colored::Colorize;
use examplan_configuration::PlannerConfiguration;
use examplan_configuration::constraints::BufferPolicy;
use examplan_configuration::output::OutputFormat;
use examplan_configuration::rules::RuleOrder;
use examplan_orchestrator::Orchestrator;
use examplan_orchestrator::PlanningRequest;
use examplan_orchestrator::RunSummary;
use examplan_total_data_processing::exports::SemesterOutcome;
use examplan_total_data_processing::sources::toml_source::TomlSemesterSource;

#[derive(Args, Debug)]
pub struct PlanArguments {
    /// TOML file with one `[[semester]]` table per semester
    #[arg(default_value = "input/semesters.toml")]
    pub input: PathBuf,
    #[arg(long)]
    pub output_directory: Option<PathBuf>,
    /// Used instead of today's date, e.g. 2026-10-18
    #[arg(long)]
    pub reference_date: Option<NaiveDate>,
    /// Extrapolate semesters up to this many years after the reference date
    #[arg(long, default_value_t = 4)]
    pub extrapolation_years: i32,
    /// markdown, ical or json. Repeat for several formats.
    #[arg(long = "format")]
    pub formats: Vec<OutputFormat>,
    /// minimum or exact
    #[arg(long)]
    pub buffer_policy: Option<BufferPolicy>,
    /// holiday_shift_first or easter_deferral_first
    #[arg(long)]
    pub rule_order: Option<RuleOrder>,
    #[arg(long)]
    pub maximum_optimization_attempts: Option<usize>,
}

impl PlanArguments {
    fn apply(&self, planner_configuration: &mut PlannerConfiguration) {
        if let Some(output_directory) = &self.output_directory {
            planner_configuration.output.directory = output_directory.clone();
        }
        if !self.formats.is_empty() {
            planner_configuration.output.formats = self.formats.clone();
        }
        if let Some(buffer_policy) = self.buffer_policy {
            planner_configuration.constraints.buffer_policy = buffer_policy;
        }
        if let Some(rule_order) = self.rule_order {
            planner_configuration.rules.rule_order = rule_order;
        }
        if let Some(maximum_optimization_attempts) = self.maximum_optimization_attempts {
            planner_configuration.search.maximum_optimization_attempts =
                maximum_optimization_attempts;
        }
    }
}

pub fn execute(
    plan_arguments: PlanArguments,
    mut planner_configuration: PlannerConfiguration,
) -> Result<()> {
    plan_arguments.apply(&mut planner_configuration);

    let planning_request = PlanningRequest {
        reference_date: plan_arguments
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive()),
        extrapolation_years: plan_arguments.extrapolation_years,
    };

    let calendar_source = TomlSemesterSource::new(&plan_arguments.input);
    let run_summary = Orchestrator::new(planner_configuration)
        .run(&calendar_source, &planning_request)
        .with_context(|| format!("planning {} failed", plan_arguments.input.display()))?;

    print_summary(&run_summary);
    Ok(())
}

fn print_summary(run_summary: &RunSummary) {
    for semester_outcome in &run_summary.semester_outcomes {
        match semester_outcome {
            SemesterOutcome::Planned(semester_plans) => {
                let mut heading = semester_plans.semester.name();
                if semester_plans.semester.is_proposal() {
                    heading.push_str(" (VORSCHLAG)");
                }
                let heading = heading.bold();
                let Some(recommended) = semester_plans.recommended() else {
                    println!("{}", heading);
                    continue;
                };

                println!(
                    "{}  {}  {} Vorlesungswochen, {} vor / {} nach HIP",
                    heading,
                    recommended.variant.to_string().bright_blue(),
                    recommended.statistics.lecture_weeks,
                    recommended.statistics.weeks_before_hip,
                    recommended.statistics.weeks_after_hip,
                );
                if semester_plans.has_alternatives() {
                    println!(
                        "    {} Varianten im Bericht",
                        semester_plans.plans.len().to_string().bright_yellow()
                    );
                }
                if recommended.is_valid() {
                    println!("    {}", "alle Bedingungen erfüllt".bright_green());
                }
                for violation in &recommended.violations {
                    println!("    {}", violation.to_string().bright_red());
                }
            }
            SemesterOutcome::Unavailable { semester, reason } => {
                println!("{}  {}", semester.bold(), reason.bright_red());
            }
        }
    }

    for path in &run_summary.written_files {
        println!("{} {}", "written".bright_green(), path.display());
    }
}
