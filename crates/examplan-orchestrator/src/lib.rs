pub mod logging;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use chrono::Datelike;
use chrono::NaiveDate;
use examplan_calendar_environment::CalendarEnvironment;
use examplan_calendar_environment::SemesterInput;
use examplan_configuration::PlannerConfiguration;
use examplan_configuration::output::OutputFormat;
use examplan_planner::ExamPeriodPlanner;
use examplan_planner::hip_proposal::default_hip_week;
use examplan_total_data_processing::DataAvailabilityError;
use examplan_total_data_processing::exports::ExportContext;
use examplan_total_data_processing::exports::SemesterOutcome;
use examplan_total_data_processing::exports::render;
use examplan_total_data_processing::sources::CalendarSource;
use examplan_total_data_processing::sources::extrapolation::extrapolate;
use examplan_total_data_processing::sources::extrapolation::mark_proposals;
use rayon::prelude::*;
use tracing::Level;
use tracing::event;
use tracing::instrument;

/// Parameters of one run that do not belong in the configuration file.
#[derive(Debug, Clone)]
pub struct PlanningRequest {
    /// Stands in for "today": extrapolation and calendar time stamps use it.
    pub reference_date: NaiveDate,
    /// Semesters are extrapolated up to `reference_date.year() + this`.
    pub extrapolation_years: i32,
}

#[derive(Debug)]
pub struct RunSummary {
    pub semester_outcomes: Vec<SemesterOutcome>,
    pub written_files: Vec<PathBuf>,
}

impl RunSummary {
    pub fn number_of_unavailable(&self) -> usize {
        self.semester_outcomes
            .iter()
            .filter(|semester_outcome| matches!(semester_outcome, SemesterOutcome::Unavailable { .. }))
            .count()
    }
}

/// Runs the pipeline: load, extrapolate, resolve HIP weeks, plan every
/// semester and write the configured artifacts.
pub struct Orchestrator {
    planner_configuration: PlannerConfiguration,
    planner: ExamPeriodPlanner,
}

impl Orchestrator {
    pub fn new(planner_configuration: PlannerConfiguration) -> Self {
        let planner = ExamPeriodPlanner::from_configuration(&planner_configuration);
        Self {
            planner_configuration,
            planner,
        }
    }

    #[instrument(level = "info", skip_all)]
    pub fn run(
        &self,
        calendar_source: &impl CalendarSource,
        planning_request: &PlanningRequest,
    ) -> Result<RunSummary> {
        let semester_outcomes = self.plan(calendar_source, planning_request)?;
        let written_files = self.write_artifacts(&semester_outcomes, planning_request.reference_date)?;

        Ok(RunSummary {
            semester_outcomes,
            written_files,
        })
    }

    /// Everything except writing files. Planned and unavailable semesters
    /// appear together in chronological order; unavailable entries without a
    /// recognizable semester name come last.
    #[instrument(level = "info", skip_all)]
    pub fn plan(
        &self,
        calendar_source: &impl CalendarSource,
        planning_request: &PlanningRequest,
    ) -> Result<Vec<SemesterOutcome>> {
        let source_data = calendar_source
            .load()
            .context("the calendar source could not be loaded")?;

        let mut calendar_environment_builder = CalendarEnvironment::builder();
        calendar_environment_builder.semesters(source_data.semesters);
        let reference_year = planning_request.reference_date.year();
        extrapolate(
            &mut calendar_environment_builder,
            reference_year,
            reference_year + planning_request.extrapolation_years,
        )
        .context("future semesters could not be extrapolated")?;

        let calendar_environment = mark_proposals(calendar_environment_builder.build());
        let semester_inputs = self.resolve_hip_weeks(calendar_environment);

        let mut semester_outcomes = self.plan_semesters(&semester_inputs);
        semester_outcomes.extend(source_data.unavailable.iter().map(unavailable));
        semester_outcomes.sort_by_key(|semester_outcome| {
            let semester_id = semester_outcome.semester_id();
            (semester_id.is_none(), semester_id)
        });
        Ok(semester_outcomes)
    }

    /// Semesters up to the last announced HIP week that lack one get the
    /// plain rule; later ones are left to the planner's proposal.
    pub fn resolve_hip_weeks(&self, calendar_environment: CalendarEnvironment) -> Vec<SemesterInput> {
        let proposal_boundary = calendar_environment.last_announced_hip();
        let target_buffer_weeks = self.planner.parameters().target_buffer_weeks;

        calendar_environment
            .into_semesters()
            .into_iter()
            .map(|mut semester_input| {
                let before_boundary =
                    proposal_boundary.is_some_and(|boundary| semester_input.id() <= boundary);
                if semester_input.hip_week.is_none() && before_boundary {
                    let hip_week = default_hip_week(&semester_input.semester, target_buffer_weeks);
                    event!(
                        Level::INFO,
                        semester = %semester_input.id(),
                        hip_week = %hip_week.week(),
                        "HIP week derived from the lecture start"
                    );
                    semester_input.hip_week = Some(hip_week);
                }
                semester_input
            })
            .collect()
    }

    /// Semesters are independent; the result keeps the input order.
    #[instrument(level = "info", skip_all, fields(number_of_semesters = semester_inputs.len()))]
    pub fn plan_semesters(&self, semester_inputs: &[SemesterInput]) -> Vec<SemesterOutcome> {
        semester_inputs
            .par_iter()
            .map(|semester_input| match self.planner.plan_semester(semester_input) {
                Ok(semester_plans) => SemesterOutcome::Planned(semester_plans),
                Err(planner_error) => {
                    event!(
                        Level::ERROR,
                        semester = %semester_input.id(),
                        error = %planner_error,
                    );
                    SemesterOutcome::Unavailable {
                        semester: semester_input.semester.name(),
                        reason: planner_error.to_string(),
                    }
                }
            })
            .collect()
    }

    pub fn render_artifacts(
        &self,
        semester_outcomes: &[SemesterOutcome],
        reference_date: NaiveDate,
    ) -> Result<Vec<(OutputFormat, String)>> {
        let export_context = ExportContext::new(&self.planner_configuration, reference_date);

        self.planner_configuration
            .output
            .formats
            .iter()
            .map(|format| {
                render(*format, &export_context, semester_outcomes)
                    .map(|rendered| (*format, rendered))
                    .with_context(|| format!("could not render the {} output", format))
            })
            .collect()
    }

    #[instrument(level = "info", skip_all)]
    pub fn write_artifacts(
        &self,
        semester_outcomes: &[SemesterOutcome],
        reference_date: NaiveDate,
    ) -> Result<Vec<PathBuf>> {
        let output = &self.planner_configuration.output;
        fs::create_dir_all(&output.directory).with_context(|| {
            format!("could not create output directory {}", output.directory.display())
        })?;

        let mut written_files = Vec::new();
        for (format, rendered) in self.render_artifacts(semester_outcomes, reference_date)? {
            let path = output.path_for(format);
            fs::write(&path, rendered)
                .with_context(|| format!("could not write {}", path.display()))?;
            event!(Level::INFO, path = %path.display(), format = %format, "written");
            written_files.push(path);
        }
        Ok(written_files)
    }
}

fn unavailable(data_availability_error: &DataAvailabilityError) -> SemesterOutcome {
    SemesterOutcome::Unavailable {
        semester: data_availability_error.semester().to_owned(),
        reason: data_availability_error.to_string(),
    }
}
