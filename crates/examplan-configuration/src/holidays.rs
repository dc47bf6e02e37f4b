use chrono::NaiveDate;
use examplan_calendar_environment::holidays::HolidayCalendar;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Holidays {
    /// Heiligabend and Silvester block exams when they fall on a weekday.
    pub christmas_eve_and_new_years_eve: bool,
    pub additional_closures: Vec<Closure>,
}

impl Default for Holidays {
    fn default() -> Self {
        Self {
            christmas_eve_and_new_years_eve: true,
            additional_closures: Vec::new(),
        }
    }
}

impl Holidays {
    pub fn holiday_calendar(&self) -> HolidayCalendar {
        HolidayCalendar::nrw()
            .with_christmas_eve_and_new_years_eve(self.christmas_eve_and_new_years_eve)
            .with_additional_closures(
                self.additional_closures
                    .iter()
                    .map(|closure| (closure.date, closure.name.clone())),
            )
    }
}
