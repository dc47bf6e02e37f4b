use std::fmt::Display;
use std::fmt::{self};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Datelike;
use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::CalendarError;
use crate::time_environment::DateRange;

static SEMESTER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(winter|sommer)semester\s*(\d{4})(?:\s*/\s*(\d{2,4}))?")
        .expect("semester name pattern is valid")
});

/// Summer sorts before winter so that `(year, kind)` is chronological.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemesterKind
{
    Summer,
    Winter,
}

impl SemesterKind
{
    /// Winter semesters open with two exam weeks (P1a, P1b), summer
    /// semesters with one.
    pub fn number_of_first_block_weeks(&self) -> usize
    {
        match self {
            SemesterKind::Summer => 1,
            SemesterKind::Winter => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemesterId
{
    pub year: i32,
    pub kind: SemesterKind,
}

impl SemesterId
{
    pub fn new(year: i32, kind: SemesterKind) -> Self
    {
        Self { year, kind }
    }

    pub fn next(&self) -> SemesterId
    {
        match self.kind {
            SemesterKind::Summer => SemesterId::new(self.year, SemesterKind::Winter),
            SemesterKind::Winter => SemesterId::new(self.year + 1, SemesterKind::Summer),
        }
    }

    /// Short form used in file names and calendar UIDs, e.g. `ws2026`.
    pub fn slug(&self) -> String
    {
        match self.kind {
            SemesterKind::Summer => format!("ss{}", self.year),
            SemesterKind::Winter => format!("ws{}", self.year),
        }
    }
}

impl Display for SemesterId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.kind {
            SemesterKind::Summer => write!(f, "Sommersemester {}", self.year),
            SemesterKind::Winter => write!(
                f,
                "Wintersemester {}/{:02}",
                self.year,
                (self.year + 1).rem_euclid(100)
            ),
        }
    }
}

impl FromStr for SemesterId
{
    type Err = CalendarError;

    fn from_str(semester_name: &str) -> Result<Self, Self::Err>
    {
        let captures = SEMESTER_NAME
            .captures(semester_name)
            .ok_or_else(|| CalendarError::UnparsableSemester(semester_name.to_string()))?;

        let kind = if captures[1].eq_ignore_ascii_case("winter") {
            SemesterKind::Winter
        } else {
            SemesterKind::Summer
        };

        let year = captures[2]
            .parse::<i32>()
            .map_err(|_| CalendarError::UnparsableSemester(semester_name.to_string()))?;

        Ok(SemesterId { year, kind })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Semester
{
    id: SemesterId,
    lecture_period: DateRange,
    proposal: bool,
}

impl Semester
{
    pub fn new(id: SemesterId, lecture_period: DateRange, proposal: bool) -> Self
    {
        Self {
            id,
            lecture_period,
            proposal,
        }
    }

    pub fn id(&self) -> SemesterId
    {
        self.id
    }

    pub fn kind(&self) -> SemesterKind
    {
        self.id.kind
    }

    pub fn name(&self) -> String
    {
        self.id.to_string()
    }

    pub fn lecture_period(&self) -> &DateRange
    {
        &self.lecture_period
    }

    pub fn lecture_start(&self) -> NaiveDate
    {
        self.lecture_period.start()
    }

    pub fn lecture_end(&self) -> NaiveDate
    {
        self.lecture_period.end()
    }

    pub fn is_proposal(&self) -> bool
    {
        self.proposal
    }

    pub fn mark_as_proposal(&mut self)
    {
        self.proposal = true;
    }

    pub fn year(&self) -> i32
    {
        self.lecture_period.start().year()
    }
}

/// Dec 24–26 and Jan 1 disqualify the week they fall into as a lecture week.
pub fn is_christmas_break_day(date: NaiveDate) -> bool
{
    matches!((date.month(), date.day()), (12, 24..=26) | (1, 1))
}
