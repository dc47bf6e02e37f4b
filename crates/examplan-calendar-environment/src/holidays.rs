//! Holiday calendar for North Rhine-Westphalia with the Cologne carnival
//! days.
//!
//! All moveable feasts are offsets from Easter Sunday, which is computed with
//! the anonymous Gregorian algorithm. The calendar is a pure function of the
//! year and its options: nothing is fetched.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::{self};
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;

use crate::CalendarError;
use crate::time_environment::DateRange;
use crate::time_environment::date;
use crate::time_environment::is_weekday;
use crate::time_environment::week::Week;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HolidayKind
{
    /// Statutory public holiday in NRW.
    Public,
    /// No exams are held, although it is not a statutory holiday
    /// (Rosenmontag, Heiligabend, Silvester, university closures).
    Regional,
    /// Only used for annotations, exams may take place (Weiberfastnacht).
    Marker,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Holiday
{
    pub date: NaiveDate,
    pub name: String,
    pub kind: HolidayKind,
}

impl Holiday
{
    pub fn new(date: NaiveDate, name: impl Into<String>, kind: HolidayKind) -> Self
    {
        Self {
            date,
            name: name.into(),
            kind,
        }
    }

    pub fn blocks_exams(&self) -> bool
    {
        !matches!(self.kind, HolidayKind::Marker)
    }
}

impl Display for Holiday
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{} ({})", self.date.format("%d.%m."), self.name)
    }
}

pub fn easter_sunday(year: i32) -> Result<NaiveDate, CalendarError>
{
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    date(year, month as u32, day as u32)
}

pub fn easter_monday(year: i32) -> Result<NaiveDate, CalendarError>
{
    Ok(easter_sunday(year)? + TimeDelta::days(1))
}

pub fn rosenmontag(year: i32) -> Result<NaiveDate, CalendarError>
{
    Ok(easter_sunday(year)? - TimeDelta::days(48))
}

pub fn weiberfastnacht(year: i32) -> Result<NaiveDate, CalendarError>
{
    Ok(easter_sunday(year)? - TimeDelta::days(52))
}

/// The week in which Easter Monday falls.
pub fn easter_week(year: i32) -> Result<Week, CalendarError>
{
    Ok(Week::containing(easter_monday(year)?))
}

/// Weeks that are annotated as carnival weeks: the week of Weiberfastnacht
/// and the week of Rosenmontag.
pub fn carnival_weeks(year: i32) -> Result<[Week; 2], CalendarError>
{
    Ok([
        Week::containing(weiberfastnacht(year)?),
        Week::containing(rosenmontag(year)?),
    ])
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar
{
    christmas_eve_and_new_years_eve: bool,
    additional_closures: Vec<Holiday>,
}

impl Default for HolidayCalendar
{
    fn default() -> Self
    {
        Self::nrw()
    }
}

impl HolidayCalendar
{
    pub fn nrw() -> Self
    {
        Self {
            christmas_eve_and_new_years_eve: true,
            additional_closures: Vec::new(),
        }
    }

    pub fn with_christmas_eve_and_new_years_eve(mut self, enabled: bool) -> Self
    {
        self.christmas_eve_and_new_years_eve = enabled;
        self
    }

    /// Closures of the university on top of the statutory holidays. They
    /// always block exams.
    pub fn with_additional_closures<I>(mut self, closures: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, String)>,
    {
        self.additional_closures.extend(
            closures
                .into_iter()
                .map(|(date, name)| Holiday::new(date, name, HolidayKind::Regional)),
        );
        self
    }

    pub fn holidays_in_year(&self, year: i32) -> Result<Vec<Holiday>, CalendarError>
    {
        let easter = easter_sunday(year)?;
        let from_easter = |days: i64| easter + TimeDelta::days(days);

        let mut holidays = vec![
            Holiday::new(date(year, 1, 1)?, "Neujahr", HolidayKind::Public),
            Holiday::new(from_easter(-52), "Weiberfastnacht", HolidayKind::Marker),
            Holiday::new(from_easter(-48), "Rosenmontag", HolidayKind::Regional),
            Holiday::new(from_easter(-2), "Karfreitag", HolidayKind::Public),
            Holiday::new(from_easter(1), "Ostermontag", HolidayKind::Public),
            Holiday::new(date(year, 5, 1)?, "Tag der Arbeit", HolidayKind::Public),
            Holiday::new(from_easter(39), "Christi Himmelfahrt", HolidayKind::Public),
            Holiday::new(from_easter(50), "Pfingstmontag", HolidayKind::Public),
            Holiday::new(from_easter(60), "Fronleichnam", HolidayKind::Public),
            Holiday::new(
                date(year, 10, 3)?,
                "Tag der Deutschen Einheit",
                HolidayKind::Public,
            ),
            Holiday::new(date(year, 11, 1)?, "Allerheiligen", HolidayKind::Public),
            Holiday::new(
                date(year, 12, 25)?,
                "Erster Weihnachtstag",
                HolidayKind::Public,
            ),
            Holiday::new(
                date(year, 12, 26)?,
                "Zweiter Weihnachtstag",
                HolidayKind::Public,
            ),
        ];

        if self.christmas_eve_and_new_years_eve {
            for (day, name) in [(24, "Heiligabend"), (31, "Silvester")] {
                let day = date(year, 12, day)?;
                if is_weekday(day) {
                    holidays.push(Holiday::new(day, name, HolidayKind::Regional));
                }
            }
        }

        holidays.extend(
            self.additional_closures
                .iter()
                .filter(|closure| chrono::Datelike::year(&closure.date) == year)
                .cloned(),
        );

        holidays.sort();
        Ok(holidays)
    }

    pub fn holiday_set(&self, years: RangeInclusive<i32>) -> Result<HolidaySet, CalendarError>
    {
        let mut holiday_set = HolidaySet::default();
        for year in years {
            for holiday in self.holidays_in_year(year)? {
                holiday_set.insert(holiday);
            }
            holiday_set.carnival_weeks.extend(carnival_weeks(year)?);
            holiday_set.easter_weeks.insert(easter_week(year)?);
        }
        Ok(holiday_set)
    }
}

/// Holidays of a contiguous span of years, indexed by date.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet
{
    by_date: BTreeMap<NaiveDate, Holiday>,
    carnival_weeks: BTreeSet<Week>,
    easter_weeks: BTreeSet<Week>,
}

impl HolidaySet
{
    /// A blocking holiday wins over a marker on the same day.
    pub fn insert(&mut self, holiday: Holiday)
    {
        match self.by_date.get(&holiday.date) {
            Some(existing) if existing.blocks_exams() && !holiday.blocks_exams() => {}
            _ => {
                self.by_date.insert(holiday.date, holiday);
            }
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Holiday>
    {
        self.by_date.get(&date)
    }

    pub fn blocking(&self, date: NaiveDate) -> Option<&Holiday>
    {
        self.get(date).filter(|holiday| holiday.blocks_exams())
    }

    pub fn is_carnival_week(&self, week: &Week) -> bool
    {
        self.carnival_weeks.contains(week)
    }

    pub fn is_easter_week(&self, week: &Week) -> bool
    {
        self.easter_weeks.contains(week)
    }

    /// Blocking holidays on weekdays within `range`.
    pub fn weekday_holidays_in(&self, range: &DateRange) -> Vec<&Holiday>
    {
        self.by_date
            .range(range.start()..=range.end())
            .map(|(_, holiday)| holiday)
            .filter(|holiday| holiday.blocks_exams() && is_weekday(holiday.date))
            .collect()
    }
}

impl FromIterator<Holiday> for HolidaySet
{
    fn from_iter<T: IntoIterator<Item = Holiday>>(iter: T) -> Self
    {
        let mut holiday_set = HolidaySet::default();
        for holiday in iter {
            holiday_set.insert(holiday);
        }
        holiday_set
    }
}
