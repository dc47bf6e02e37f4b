use std::collections::BTreeSet;

use chrono::NaiveDate;
use chrono::TimeDelta;
use examplan_calendar_environment::exam_week::ExamWeek;
use examplan_calendar_environment::plan::PlanStatistics;
use examplan_calendar_environment::semester::Semester;
use examplan_calendar_environment::semester::is_christmas_break_day;
use examplan_calendar_environment::time_environment::next_monday_after;
use examplan_calendar_environment::time_environment::week::Week;

/// Counts pure lecture weeks of one semester for a set of placed exam weeks.
pub struct LectureWeekCounter<'a>
{
    semester: &'a Semester,
    exam_days: BTreeSet<NaiveDate>,
}

impl<'a> LectureWeekCounter<'a>
{
    pub fn new(semester: &'a Semester, exam_weeks: &[ExamWeek]) -> Self
    {
        let exam_days = exam_weeks
            .iter()
            .flat_map(|exam_week| exam_week.exam_days.iter().copied())
            .collect();

        Self {
            semester,
            exam_days,
        }
    }

    /// Overlaps the lecture period, holds no exam day and no Christmas break
    /// day on a weekday.
    pub fn is_pure_lecture_week(&self, week: &Week) -> bool
    {
        let working_days = week.working_days();

        !working_days.iter().any(|day| self.exam_days.contains(day))
            && !working_days.iter().copied().any(is_christmas_break_day)
            && week.working_range().overlaps(self.semester.lecture_period())
    }

    /// Pure lecture weeks from the week of the lecture start to the week of
    /// the lecture end.
    pub fn total(&self) -> usize
    {
        let mut week = Week::containing(self.semester.lecture_start());
        let mut lecture_weeks = 0;
        while week.monday() <= self.semester.lecture_end() {
            if self.is_pure_lecture_week(&week) {
                lecture_weeks += 1;
            }
            week = week + TimeDelta::weeks(1);
        }
        lecture_weeks
    }

    /// Pure lecture weeks starting with the first Monday after `after` and
    /// ending before the week of `before`.
    pub fn between(&self, after: NaiveDate, before: NaiveDate) -> usize
    {
        let boundary = Week::containing(before);
        let mut week = Week::containing(next_monday_after(after));
        let mut lecture_weeks = 0;
        while week < boundary {
            if self.is_pure_lecture_week(&week) {
                lecture_weeks += 1;
            }
            week = week + TimeDelta::weeks(1);
        }
        lecture_weeks
    }

    /// Buffers are measured from the last day of the first block to the
    /// first day of P2 and from the last day of P2 to the first day of P3.
    pub fn statistics(&self, exam_weeks: &[ExamWeek]) -> PlanStatistics
    {
        let mut statistics = PlanStatistics {
            lecture_weeks: self.total(),
            ..PlanStatistics::default()
        };

        let first_block_end = exam_weeks
            .iter()
            .filter(|exam_week| exam_week.tag.is_first_block())
            .map(last_day_or_friday)
            .max();
        let hip = exam_weeks.iter().find(|exam_week| !exam_week.tag.is_first_block());
        let last_block_start = exam_weeks.last().map(first_day_or_monday);

        if let (Some(first_block_end), Some(hip), Some(last_block_start)) =
            (first_block_end, hip, last_block_start)
        {
            statistics.weeks_before_hip = self.between(first_block_end, first_day_or_monday(hip));
            statistics.weeks_after_hip = self.between(last_day_or_friday(hip), last_block_start);
        }

        statistics
    }
}

fn first_day_or_monday(exam_week: &ExamWeek) -> NaiveDate
{
    exam_week
        .first_day()
        .unwrap_or(exam_week.nominal_week.monday())
}

fn last_day_or_friday(exam_week: &ExamWeek) -> NaiveDate
{
    exam_week
        .last_day()
        .unwrap_or(exam_week.nominal_week.friday())
}

#[cfg(test)]
mod tests
{
    use examplan_calendar_environment::holidays::HolidayCalendar;
    use examplan_calendar_environment::semester::SemesterId;
    use examplan_calendar_environment::semester::SemesterKind;
    use examplan_calendar_environment::time_environment::DateRange;

    use super::*;
    use crate::holiday_shift::materialize;
    use crate::placement::Placement;
    use crate::placement::Shift;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn winter_2026() -> Semester
    {
        Semester::new(
            SemesterId::new(2026, SemesterKind::Winter),
            DateRange::new(date(2026, 9, 28), date(2027, 2, 12)).unwrap(),
            false,
        )
    }

    fn statistics_for(semester: &Semester, hip: NaiveDate, shift: Shift) -> PlanStatistics
    {
        let holiday_set = HolidayCalendar::nrw()
            .holiday_set(semester.year() - 1..=semester.year() + 1)
            .unwrap();
        let placement = Placement::default_for(semester, Week::containing(hip)).shifted(shift);
        let exam_weeks = materialize(&placement, &holiday_set, 21);

        LectureWeekCounter::new(semester, &exam_weeks).statistics(&exam_weeks)
    }

    #[test]
    fn test_christmas_weeks_are_not_lecture_weeks()
    {
        let semester = winter_2026();
        let counter = LectureWeekCounter::new(&semester, &[]);

        assert!(!counter.is_pure_lecture_week(&Week::containing(date(2026, 12, 21))));
        assert!(!counter.is_pure_lecture_week(&Week::containing(date(2026, 12, 28))));
        assert!(counter.is_pure_lecture_week(&Week::containing(date(2027, 1, 4))));
        assert!(!counter.is_pure_lecture_week(&Week::containing(date(2026, 9, 21))));
    }

    #[test]
    fn test_winter_2026_optimized_statistics()
    {
        let statistics = statistics_for(&winter_2026(), date(2026, 11, 16), Shift::new(-2, 0));

        assert_eq!(statistics, PlanStatistics {
            lecture_weeks: 15,
            weeks_before_hip: 7,
            weeks_after_hip: 8,
        });
    }

    #[test]
    fn test_winter_2026_default_statistics()
    {
        let statistics = statistics_for(&winter_2026(), date(2026, 11, 16), Shift::default());

        assert_eq!(statistics.weeks_before_hip, 5);
        assert_eq!(statistics.weeks_after_hip, 8);
        assert_eq!(statistics.lecture_weeks, 13);
    }
}
