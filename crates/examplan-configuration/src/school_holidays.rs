use chrono::Datelike;
use chrono::NaiveDate;
use examplan_calendar_environment::semester::SemesterKind;
use serde::Deserialize;
use serde::Serialize;

/// School holidays are only shown in the report, the planner ignores them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SchoolHoliday {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SchoolHoliday {
    pub fn new(name: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.to_owned(),
            start,
            end,
        }
    }

    /// Summer semesters list the Easter and summer holidays, winter semesters
    /// the autumn holidays of the year the semester starts in.
    pub fn is_relevant_for(&self, year: i32, kind: SemesterKind) -> bool {
        if self.start.year() != year {
            return false;
        }
        match kind {
            SemesterKind::Summer => matches!(self.name.as_str(), "Ostern" | "Sommer"),
            SemesterKind::Winter => self.name == "Herbst",
        }
    }
}

pub fn relevant_school_holidays(
    school_holidays: &[SchoolHoliday],
    year: i32,
    kind: SemesterKind,
) -> Vec<&SchoolHoliday> {
    school_holidays
        .iter()
        .filter(|school_holiday| school_holiday.is_relevant_for(year, kind))
        .collect()
}
