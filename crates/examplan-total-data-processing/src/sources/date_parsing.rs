use std::sync::LazyLock;

use chrono::Datelike;
use chrono::NaiveDate;
use examplan_calendar_environment::time_environment::DateRange;
use regex::Regex;

static FULL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})").expect("full date pattern is valid")
});

static DAY_AND_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\.(\d{1,2})\.?").expect("day and month pattern is valid")
});

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("year pattern is valid"));

static RANGE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:–|—|-|\bbis\b)\s*").expect("range separator pattern is valid")
});

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|character| !character.is_whitespace())
        .collect()
}

/// Parses `dd.mm.yyyy`, or `dd.mm.` when a `default_year` is given. Whitespace
/// including non-breaking spaces is ignored.
pub fn parse_date(text: &str, default_year: Option<i32>) -> Option<NaiveDate> {
    let text = normalize(text);

    if let Some(captures) = FULL_DATE.captures(&text) {
        return NaiveDate::from_ymd_opt(
            captures[3].parse().ok()?,
            captures[2].parse().ok()?,
            captures[1].parse().ok()?,
        );
    }

    let captures = DAY_AND_MONTH.captures(&text)?;
    NaiveDate::from_ymd_opt(
        default_year?,
        captures[2].parse().ok()?,
        captures[1].parse().ok()?,
    )
}

/// Parses announcements like `16.11. – 20.11.2026` or `28.09.2026 bis
/// 12.02.2027`. A start without a year takes the year of the end, or the year
/// before when that would invert the range.
pub fn parse_date_range(text: &str) -> Option<DateRange> {
    let mut parts = RANGE_SEPARATOR.splitn(text.trim(), 2);
    let (start_text, end_text) = (parts.next()?, parts.next()?);

    let year = YEAR
        .find(text)
        .and_then(|year| year.as_str().parse::<i32>().ok());

    let end = parse_date(end_text, year)?;
    let mut start = parse_date(start_text, Some(end.year()))?;
    if start > end && !FULL_DATE.is_match(&normalize(start_text)) {
        start = start.with_year(end.year() - 1)?;
    }

    DateRange::new(start, end).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("28.09.2026", None), Some(date(2026, 9, 28)));
        assert_eq!(parse_date("16.11.", Some(2026)), Some(date(2026, 11, 16)));
        assert_eq!(parse_date("16.11.", None), None);
        assert_eq!(parse_date("1.3.2027", None), Some(date(2027, 3, 1)));
        assert_eq!(parse_date("31.02.2027", None), None);
    }

    #[test]
    fn test_parse_date_ignores_non_breaking_spaces() {
        assert_eq!(
            parse_date("28.\u{a0}09.\u{a0}2026", None),
            Some(date(2026, 9, 28))
        );
    }

    #[test]
    fn test_parse_date_range_separators() {
        let expected = DateRange::new(date(2026, 9, 28), date(2027, 2, 12)).unwrap();

        assert_eq!(parse_date_range("28.09.2026 – 12.02.2027"), Some(expected));
        assert_eq!(parse_date_range("28.09.2026-12.02.2027"), Some(expected));
        assert_eq!(parse_date_range("28.09.2026 bis 12.02.2027"), Some(expected));
    }

    #[test]
    fn test_parse_date_range_without_start_year() {
        assert_eq!(
            parse_date_range("16.11. – 20.11.2026"),
            Some(DateRange::new(date(2026, 11, 16), date(2026, 11, 20)).unwrap())
        );
        assert_eq!(
            parse_date_range("28.12. - 03.01.2027"),
            Some(DateRange::new(date(2026, 12, 28), date(2027, 1, 3)).unwrap())
        );
    }

    #[test]
    fn test_parse_date_range_rejects_garbage() {
        assert_eq!(parse_date_range("wird noch bekanntgegeben"), None);
        assert_eq!(parse_date_range("12.02.2027"), None);
        assert_eq!(parse_date_range("12.02.2027 – 28.09.2026"), None);
    }
}
