pub mod ical;
pub mod json;
pub mod markdown;

use chrono::NaiveDate;
use examplan_calendar_environment::holidays::HolidayCalendar;
use examplan_calendar_environment::plan::SemesterPlans;
use examplan_calendar_environment::semester::SemesterId;
use examplan_configuration::PlannerConfiguration;
use examplan_configuration::output::Output;
use examplan_configuration::output::OutputFormat;
use examplan_configuration::school_holidays::SchoolHoliday;
use serde::Deserialize;
use serde::Serialize;

use crate::ExportError;

/// The result of one semester as it appears in the artifacts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SemesterOutcome {
    Planned(SemesterPlans),
    Unavailable { semester: String, reason: String },
}

impl SemesterOutcome {
    pub fn semester_name(&self) -> String {
        match self {
            SemesterOutcome::Planned(semester_plans) => semester_plans.semester.name(),
            SemesterOutcome::Unavailable { semester, .. } => semester.clone(),
        }
    }

    /// `None` for an unavailable semester whose name does not parse.
    pub fn semester_id(&self) -> Option<SemesterId> {
        match self {
            SemesterOutcome::Planned(semester_plans) => Some(semester_plans.semester.id()),
            SemesterOutcome::Unavailable { semester, .. } => semester.parse().ok(),
        }
    }
}

/// What the renderers need besides the plans. `reference_date` replaces the
/// wall clock so that repeated runs produce identical files.
pub struct ExportContext<'a> {
    pub output: &'a Output,
    pub school_holidays: &'a [SchoolHoliday],
    pub holiday_calendar: HolidayCalendar,
    pub reference_date: NaiveDate,
}

impl<'a> ExportContext<'a> {
    pub fn new(planner_configuration: &'a PlannerConfiguration, reference_date: NaiveDate) -> Self {
        Self {
            output: &planner_configuration.output,
            school_holidays: &planner_configuration.school_holidays,
            holiday_calendar: planner_configuration.holidays.holiday_calendar(),
            reference_date,
        }
    }
}

pub fn render(
    format: OutputFormat,
    export_context: &ExportContext,
    semester_outcomes: &[SemesterOutcome],
) -> Result<String, ExportError> {
    match format {
        OutputFormat::Markdown => markdown::render(export_context, semester_outcomes),
        OutputFormat::Ical => Ok(ical::render(export_context, semester_outcomes)),
        OutputFormat::Json => json::render(semester_outcomes),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use examplan_calendar_environment::exam_week::Annotation;
    use examplan_calendar_environment::exam_week::ExamWeek;
    use examplan_calendar_environment::exam_week::ExamWeekTag;
    use examplan_calendar_environment::hip_week::HipStatus;
    use examplan_calendar_environment::hip_week::HipWeek;
    use examplan_calendar_environment::holidays::Holiday;
    use examplan_calendar_environment::holidays::HolidayKind;
    use examplan_calendar_environment::plan::Plan;
    use examplan_calendar_environment::plan::PlanStatistics;
    use examplan_calendar_environment::plan::PlanVariant;
    use examplan_calendar_environment::plan::SemesterPlans;
    use examplan_calendar_environment::semester::Semester;
    use examplan_calendar_environment::semester::SemesterId;
    use examplan_calendar_environment::semester::SemesterKind;
    use examplan_calendar_environment::time_environment::DateRange;
    use examplan_calendar_environment::time_environment::week::Week;

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn full_week(tag: ExamWeekTag, monday: NaiveDate) -> ExamWeek {
        let week = Week::containing(monday);
        ExamWeek::new(tag, week, week.working_days().to_vec())
    }

    /// Wintersemester 2026/27 with the first block moved two weeks ahead of
    /// the lecture start.
    pub fn winter_2026() -> SemesterPlans {
        let semester = Semester::new(
            SemesterId::new(2026, SemesterKind::Winter),
            DateRange::new(date(2026, 9, 28), date(2027, 2, 12)).unwrap(),
            false,
        );
        let hip_week = HipWeek::new(Week::containing(date(2026, 11, 16)), HipStatus::Fixed);

        let mut p2 = full_week(ExamWeekTag::P2, date(2026, 11, 16));
        p2.annotate(Annotation::Hip(HipStatus::Fixed));

        let mut p3 = ExamWeek::new(
            ExamWeekTag::P3,
            Week::containing(date(2027, 2, 8)),
            vec![
                date(2027, 2, 5),
                date(2027, 2, 9),
                date(2027, 2, 10),
                date(2027, 2, 11),
                date(2027, 2, 12),
            ],
        )
        .with_holidays(vec![Holiday::new(
            date(2027, 2, 8),
            "Rosenmontag",
            HolidayKind::Regional,
        )]);
        p3.annotate(Annotation::Karneval);

        SemesterPlans {
            semester,
            hip_week,
            plans: vec![Plan {
                variant: PlanVariant::Optimized,
                exam_weeks: vec![
                    full_week(ExamWeekTag::P1a, date(2026, 9, 14)),
                    full_week(ExamWeekTag::P1b, date(2026, 9, 21)),
                    p2,
                    p3,
                ],
                violations: Vec::new(),
                statistics: PlanStatistics {
                    lecture_weeks: 15,
                    weeks_before_hip: 7,
                    weeks_after_hip: 8,
                },
                objective_value: 50,
            }],
        }
    }
}
