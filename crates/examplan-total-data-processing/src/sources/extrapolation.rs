use chrono::TimeDelta;
use examplan_calendar_environment::CalendarEnvironment;
use examplan_calendar_environment::CalendarEnvironmentBuilder;
use examplan_calendar_environment::CalendarError;
use examplan_calendar_environment::SemesterInput;
use examplan_calendar_environment::semester::Semester;
use examplan_calendar_environment::semester::SemesterId;
use examplan_calendar_environment::semester::SemesterKind;
use examplan_calendar_environment::time_environment::DateRange;
use examplan_calendar_environment::time_environment::week::Week;
use tracing::Level;
use tracing::event;

const SUMMER_START_ISO_WEEK: u32 = 12;
const WINTER_START_ISO_WEEK: u32 = 39;

/// The usual TH Köln lecture period: summer from the Monday of ISO week 12 for
/// 18 weeks, winter from the Monday of ISO week 39 for 20 weeks, both ending
/// on a Friday.
pub fn extrapolated_lecture_period(semester_id: SemesterId) -> Result<DateRange, CalendarError> {
    let (week, lecture_weeks) = match semester_id.kind {
        SemesterKind::Summer => (SUMMER_START_ISO_WEEK, 17),
        SemesterKind::Winter => (WINTER_START_ISO_WEEK, 19),
    };

    let start = Week::from_iso(semester_id.year, week)
        .ok_or(CalendarError::InvalidIsoWeek {
            year: semester_id.year,
            week,
        })?
        .monday();
    let end = start + TimeDelta::weeks(lecture_weeks) + TimeDelta::days(4);

    DateRange::new(start, end)
}

/// Semesters between the earliest and the latest known one that the builder
/// does not hold. Extrapolation only runs forward, so these stay unplanned.
pub fn missing_semesters(calendar_environment_builder: &CalendarEnvironmentBuilder) -> Vec<SemesterId> {
    let (Some(earliest), Some(latest)) = (
        calendar_environment_builder.earliest(),
        calendar_environment_builder.latest(),
    ) else {
        return Vec::new();
    };

    std::iter::successors(Some(earliest.next()), |semester_id| Some(semester_id.next()))
        .take_while(|semester_id| *semester_id < latest)
        .filter(|semester_id| !calendar_environment_builder.contains(semester_id))
        .collect()
}

/// Appends proposal semesters after the latest known one until a semester of
/// `until_year` has been followed by its successor. Known semesters are never
/// replaced.
pub fn extrapolate(
    calendar_environment_builder: &mut CalendarEnvironmentBuilder,
    reference_year: i32,
    until_year: i32,
) -> Result<usize, CalendarError> {
    for semester_id in missing_semesters(calendar_environment_builder) {
        event!(
            Level::WARN,
            semester = %semester_id,
            "semester between known semesters is missing and will not be planned"
        );
    }

    let mut current = calendar_environment_builder
        .latest()
        .unwrap_or(SemesterId::new(reference_year, SemesterKind::Summer));

    let mut number_of_extrapolated = 0;
    while current.year <= until_year {
        current = current.next();
        if calendar_environment_builder.contains(&current) {
            continue;
        }

        let lecture_period = extrapolated_lecture_period(current)?;
        event!(Level::DEBUG, semester = %current, lecture_period = %lecture_period);
        calendar_environment_builder.semester(SemesterInput::new(
            Semester::new(current, lecture_period, true),
            None,
        ));
        number_of_extrapolated += 1;
    }

    event!(Level::INFO, number_of_extrapolated, until_year);
    Ok(number_of_extrapolated)
}

/// Semesters after the last announced HIP week are proposals. Without any
/// announcement every semester is one.
pub fn mark_proposals(calendar_environment: CalendarEnvironment) -> CalendarEnvironment {
    let proposal_boundary = calendar_environment.last_announced_hip();

    let semesters = calendar_environment
        .into_semesters()
        .into_iter()
        .map(|mut semester_input| {
            if proposal_boundary.is_none_or(|boundary| semester_input.id() > boundary) {
                semester_input.semester.mark_as_proposal();
            }
            semester_input
        });

    CalendarEnvironment::builder().semesters(semesters).build()
}
