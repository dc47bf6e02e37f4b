//! Exam period planning for one semester.
//!
//! The planner enumerates shifts of the first and the last exam block around
//! the default placement, applies the holiday shift and the Easter rule to
//! each of them, measures lecture weeks and buffers, and turns the ranked
//! candidates into one or more named plans. Constraint violations are part of
//! the result and never an error.

pub mod annotations;
pub mod easter_rule;
pub mod evaluation;
pub mod hip_proposal;
pub mod holiday_shift;
pub mod lecture_weeks;
pub mod parameters;
pub mod placement;
pub mod variants;

use chrono::Datelike;
use examplan_calendar_environment::CalendarError;
use examplan_calendar_environment::SemesterInput;
use examplan_calendar_environment::hip_week::HipWeek;
use examplan_calendar_environment::holidays::HolidayCalendar;
use examplan_calendar_environment::holidays::HolidaySet;
use examplan_calendar_environment::plan::SemesterPlans;
use examplan_calendar_environment::semester::Semester;
use examplan_configuration::PlannerConfiguration;
use itertools::iproduct;
use thiserror::Error;
use tracing::Level;
use tracing::event;
use tracing::instrument;

use self::evaluation::Candidate;
use self::evaluation::PlanningContext;
use self::parameters::PlannerParameters;
use self::placement::Shift;
use self::variants::select_plans;

#[derive(Error, Debug)]
pub enum PlannerError
{
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("no HIP week could be proposed for {semester}: the buffer range is empty")]
    NoHipCandidate
    {
        semester: String
    },
    #[error("the search window for {semester} contains no placement")]
    EmptySearchWindow
    {
        semester: String
    },
}

pub struct ExamPeriodPlanner
{
    parameters: PlannerParameters,
    holiday_calendar: HolidayCalendar,
}

impl ExamPeriodPlanner
{
    pub fn new(parameters: PlannerParameters, holiday_calendar: HolidayCalendar) -> Self
    {
        Self {
            parameters,
            holiday_calendar,
        }
    }

    pub fn from_configuration(planner_configuration: &PlannerConfiguration) -> Self
    {
        Self::new(
            PlannerParameters::new(planner_configuration),
            planner_configuration.holidays.holiday_calendar(),
        )
    }

    pub fn parameters(&self) -> &PlannerParameters
    {
        &self.parameters
    }

    /// Holidays of every year a shifted exam week can reach.
    pub fn holiday_set(&self, semester: &Semester) -> Result<HolidaySet, PlannerError>
    {
        let first_year = semester.lecture_start().year() - 1;
        let last_year = semester.lecture_end().year() + 1;
        Ok(self.holiday_calendar.holiday_set(first_year..=last_year)?)
    }

    /// Plans one semester. A missing HIP week is proposed first.
    #[instrument(level = "info", skip_all, fields(semester = %semester_input.semester.name()))]
    pub fn plan_semester(&self, semester_input: &SemesterInput) -> Result<SemesterPlans, PlannerError>
    {
        let semester = &semester_input.semester;
        let holiday_set = self.holiday_set(semester)?;

        let hip_week = match semester_input.hip_week {
            Some(hip_week) => hip_week,
            None => self.propose_hip_week(semester, &holiday_set)?,
        };

        let planning_context = PlanningContext {
            semester,
            hip_week,
            holiday_set: &holiday_set,
            parameters: &self.parameters,
        };

        let standard = planning_context.evaluate(Shift::default());
        let candidates: Vec<Candidate> = iproduct!(
            self.parameters.first_block_shifts.clone(),
            self.parameters.last_block_shifts.clone()
        )
        .map(|(first_block, last_block)| {
            planning_context.evaluate(Shift::new(first_block, last_block))
        })
        .collect();

        if candidates.is_empty() {
            return Err(PlannerError::EmptySearchWindow {
                semester: semester.name(),
            });
        }

        event!(
            Level::DEBUG,
            number_of_candidates = candidates.len(),
            hip_week = %hip_week.week(),
        );

        let plans = select_plans(&planning_context, standard, candidates);

        event!(
            Level::INFO,
            variants = ?plans.iter().map(|plan| plan.variant).collect::<Vec<_>>(),
            statistics = ?plans.first().map(|plan| plan.statistics),
        );

        Ok(SemesterPlans {
            semester: semester.clone(),
            hip_week,
            plans,
        })
    }
}

impl ExamPeriodPlanner
{
    fn propose_hip_week(
        &self,
        semester: &Semester,
        holiday_set: &HolidaySet,
    ) -> Result<HipWeek, PlannerError>
    {
        let hip_week = hip_proposal::propose_hip_week(semester, holiday_set, &self.parameters)
            .ok_or_else(|| PlannerError::NoHipCandidate {
                semester: semester.name(),
            })?;

        event!(Level::INFO, proposed_hip_week = %hip_week.week());
        Ok(hip_week)
    }
}

impl Default for ExamPeriodPlanner
{
    fn default() -> Self
    {
        Self::from_configuration(&PlannerConfiguration::default())
    }
}
