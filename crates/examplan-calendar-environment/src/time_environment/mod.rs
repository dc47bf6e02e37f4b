use std::fmt::Display;
use std::fmt::{self};

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::TimeDelta;
use chrono::Weekday;
use serde::Deserialize;
use serde::Serialize;

use crate::CalendarError;

pub mod week;

pub const GERMAN_WEEKDAYS: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError>
{
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidDate { year, month, day })
}

pub fn is_weekday(date: NaiveDate) -> bool
{
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn german_weekday(date: NaiveDate) -> &'static str
{
    GERMAN_WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// Formats as `Mo 14.09.2026`.
pub fn format_with_weekday(date: NaiveDate) -> String
{
    format!("{} {}", german_weekday(date), date.format("%d.%m.%Y"))
}

/// The first Monday strictly after `date`.
pub fn next_monday_after(date: NaiveDate) -> NaiveDate
{
    let days_until_monday = 7 - date.weekday().num_days_from_monday() as i64;
    date + TimeDelta::days(days_until_monday)
}

/// Inclusive range of calendar days.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateRange
{
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange
{
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError>
    {
        if end < start {
            return Err(CalendarError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate
    {
        self.start
    }

    pub fn end(&self) -> NaiveDate
    {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool
    {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool
    {
        self.start <= other.end && other.start <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<>
    {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32>
    {
        self.start.year()..=self.end.year()
    }
}

impl Display for DateRange
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "{} - {}",
            self.start.format("%d.%m.%Y"),
            self.end.format("%d.%m.%Y")
        )
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_date_rejects_invalid()
    {
        assert_eq!(
            date(2027, 2, 29),
            Err(CalendarError::InvalidDate {
                year: 2027,
                month: 2,
                day: 29
            })
        );
        assert!(date(2028, 2, 29).is_ok());
    }

    #[test]
    fn test_next_monday_after()
    {
        let friday = date(2026, 9, 25).unwrap();
        let monday = date(2026, 9, 28).unwrap();

        assert_eq!(next_monday_after(friday), monday);
        assert_eq!(next_monday_after(monday), date(2026, 10, 5).unwrap());
    }

    #[test]
    fn test_date_range_inverted()
    {
        let start = date(2027, 2, 12).unwrap();
        let end = date(2026, 9, 28).unwrap();

        assert_eq!(
            DateRange::new(start, end),
            Err(CalendarError::InvertedRange { start, end })
        );
    }

    #[test]
    fn test_date_range_display_and_days()
    {
        let range = DateRange::new(date(2027, 2, 5).unwrap(), date(2027, 2, 12).unwrap()).unwrap();

        assert_eq!(range.to_string(), "05.02.2027 - 12.02.2027");
        assert_eq!(range.days().count(), 8);
        assert_eq!(range.years(), 2027..=2027);
    }

    #[test]
    fn test_format_with_weekday()
    {
        assert_eq!(
            format_with_weekday(date(2026, 9, 14).unwrap()),
            "Mo 14.09.2026"
        );
        assert_eq!(
            format_with_weekday(date(2027, 3, 19).unwrap()),
            "Fr 19.03.2027"
        );
    }
}
