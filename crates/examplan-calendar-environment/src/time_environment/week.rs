use std::fmt::Display;
use std::fmt::{self};
use std::ops::Add;
use std::ops::Sub;

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::TimeDelta;
use chrono::Weekday;
use serde::Deserialize;
use serde::Serialize;

use super::DateRange;

/// A calendar week, identified by its Monday.
#[derive(Serialize, Deserialize, Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct Week
{
    monday: NaiveDate,
}

impl Week
{
    pub fn containing(date: NaiveDate) -> Self
    {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self {
            monday: date - TimeDelta::days(offset),
        }
    }

    pub fn from_iso(year: i32, week: u32) -> Option<Self>
    {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).map(|monday| Self { monday })
    }

    pub fn monday(&self) -> NaiveDate
    {
        self.monday
    }

    pub fn friday(&self) -> NaiveDate
    {
        self.monday + TimeDelta::days(4)
    }

    pub fn working_days(&self) -> [NaiveDate; 5]
    {
        std::array::from_fn(|offset| self.monday + TimeDelta::days(offset as i64))
    }

    pub fn working_range(&self) -> DateRange
    {
        DateRange {
            start: self.monday,
            end: self.friday(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool
    {
        Week::containing(date) == *self
    }

    pub fn weeks_until(&self, other: &Week) -> i64
    {
        (other.monday - self.monday).num_days() / 7
    }

    pub fn iso_week(&self) -> u32
    {
        self.monday.iso_week().week()
    }
}

impl Add<TimeDelta> for Week
{
    type Output = Week;

    fn add(self, rhs: TimeDelta) -> Self::Output
    {
        Week::containing(self.monday + rhs)
    }
}

impl Sub<TimeDelta> for Week
{
    type Output = Week;

    fn sub(self, rhs: TimeDelta) -> Self::Output
    {
        Week::containing(self.monday - rhs)
    }
}

impl Display for Week
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(
            f,
            "KW {:02}/{} ({})",
            self.monday.iso_week().week(),
            self.monday.iso_week().year(),
            self.monday.format("%d.%m.%Y")
        )
    }
}
