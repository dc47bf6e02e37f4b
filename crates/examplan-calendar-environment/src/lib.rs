pub mod exam_week;
pub mod hip_week;
pub mod holidays;
pub mod plan;
pub mod semester;
pub mod time_environment;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use self::hip_week::HipWeek;
use self::semester::Semester;
use self::semester::SemesterId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError
{
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate
    {
        year: i32,
        month: u32,
        day: u32,
    },
    #[error("date range starts on {start} but ends on {end}")]
    InvertedRange
    {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("{year} has no ISO week {week}")]
    InvalidIsoWeek
    {
        year: i32,
        week: u32,
    },
    #[error("'{0}' is not a semester name like 'Sommersemester 2027' or 'Wintersemester 2026/27'")]
    UnparsableSemester(String),
}

/// One semester as delivered by a calendar data source. The HIP week is
/// `None` when it has not been announced yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SemesterInput
{
    pub semester: Semester,
    pub hip_week: Option<HipWeek>,
}

impl SemesterInput
{
    pub fn new(semester: Semester, hip_week: Option<HipWeek>) -> Self
    {
        Self { semester, hip_week }
    }

    pub fn id(&self) -> SemesterId
    {
        self.semester.id()
    }
}

/// All semesters that should be planned in one run, in chronological order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEnvironment
{
    semesters: Vec<SemesterInput>,
}

impl CalendarEnvironment
{
    pub fn builder() -> CalendarEnvironmentBuilder
    {
        CalendarEnvironmentBuilder::default()
    }

    pub fn semesters(&self) -> &[SemesterInput]
    {
        &self.semesters
    }

    pub fn last_announced_hip(&self) -> Option<SemesterId>
    {
        self.semesters
            .iter()
            .filter(|semester_input| semester_input.hip_week.is_some())
            .map(SemesterInput::id)
            .max()
    }

    pub fn into_semesters(self) -> Vec<SemesterInput>
    {
        self.semesters
    }
}

#[derive(Default)]
pub struct CalendarEnvironmentBuilder
{
    semesters: Vec<SemesterInput>,
}

impl CalendarEnvironmentBuilder
{
    /// Later entries for the same semester replace earlier ones.
    pub fn semester(&mut self, semester_input: SemesterInput) -> &mut Self
    {
        self.semesters
            .retain(|existing| existing.id() != semester_input.id());
        self.semesters.push(semester_input);
        self
    }

    pub fn semesters<I>(&mut self, semester_inputs: I) -> &mut Self
    where
        I: IntoIterator<Item = SemesterInput>,
    {
        for semester_input in semester_inputs {
            self.semester(semester_input);
        }
        self
    }

    pub fn contains(&self, semester_id: &SemesterId) -> bool
    {
        self.semesters
            .iter()
            .any(|semester_input| &semester_input.id() == semester_id)
    }

    pub fn earliest(&self) -> Option<SemesterId>
    {
        self.semesters.iter().map(SemesterInput::id).min()
    }

    pub fn latest(&self) -> Option<SemesterId>
    {
        self.semesters.iter().map(SemesterInput::id).max()
    }

    pub fn build(&mut self) -> CalendarEnvironment
    {
        let mut semesters = std::mem::take(&mut self.semesters);
        semesters.sort_by_key(SemesterInput::id);
        CalendarEnvironment { semesters }
    }
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;

    use super::*;
    use crate::hip_week::HipStatus;
    use crate::semester::SemesterKind;
    use crate::time_environment::DateRange;
    use crate::time_environment::week::Week;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn summer(year: i32, hip: Option<NaiveDate>) -> SemesterInput
    {
        let semester = Semester::new(
            SemesterId::new(year, SemesterKind::Summer),
            DateRange::new(date(year, 3, 20), date(year, 7, 14)).unwrap(),
            false,
        );
        SemesterInput::new(
            semester,
            hip.map(|monday| HipWeek::new(Week::containing(monday), HipStatus::Fixed)),
        )
    }

    #[test]
    fn test_builder_sorts_chronologically()
    {
        let calendar_environment = CalendarEnvironment::builder()
            .semester(summer(2028, None))
            .semester(summer(2026, Some(date(2026, 5, 18))))
            .semester(summer(2027, None))
            .build();

        let years: Vec<i32> = calendar_environment
            .semesters()
            .iter()
            .map(|semester_input| semester_input.id().year)
            .collect();

        assert_eq!(years, vec![2026, 2027, 2028]);
    }

    #[test]
    fn test_builder_replaces_duplicates()
    {
        let calendar_environment = CalendarEnvironment::builder()
            .semester(summer(2027, None))
            .semester(summer(2027, Some(date(2027, 5, 10))))
            .build();

        assert_eq!(calendar_environment.semesters().len(), 1);
        assert!(calendar_environment.semesters()[0].hip_week.is_some());
    }

    #[test]
    fn test_last_announced_hip()
    {
        let calendar_environment = CalendarEnvironment::builder()
            .semester(summer(2026, Some(date(2026, 5, 18))))
            .semester(summer(2027, None))
            .build();

        assert_eq!(
            calendar_environment.last_announced_hip(),
            Some(SemesterId::new(2026, SemesterKind::Summer))
        );
    }
}
