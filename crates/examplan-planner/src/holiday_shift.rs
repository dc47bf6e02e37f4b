//! Holiday shifting: an exam week keeps its free working days and takes the
//! days it lost from before its Monday, latest first.
//!
//! Weeks are processed from the latest to the earliest so that a week which
//! reaches back into its predecessor pushes the predecessor further back.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use chrono::TimeDelta;
use examplan_calendar_environment::exam_week::EXAM_DAYS_PER_WEEK;
use examplan_calendar_environment::exam_week::ExamWeek;
use examplan_calendar_environment::exam_week::ExamWeekTag;
use examplan_calendar_environment::holidays::Holiday;
use examplan_calendar_environment::holidays::HolidaySet;
use examplan_calendar_environment::time_environment::is_weekday;
use examplan_calendar_environment::time_environment::week::Week;
use tracing::Level;
use tracing::event;

use crate::placement::Placement;

/// Exam days of all weeks of a placement, in calendar order. A week that
/// cannot collect five days within `maximum_backward_days` keeps fewer.
pub fn materialize(
    placement: &Placement,
    holiday_set: &HolidaySet,
    maximum_backward_days: i64,
) -> Vec<ExamWeek>
{
    let mut used_days = BTreeSet::new();
    let mut exam_weeks: Vec<ExamWeek> = placement
        .tagged_weeks()
        .into_iter()
        .rev()
        .map(|(tag, week)| {
            let exam_week =
                shift_week(tag, week, holiday_set, &used_days, maximum_backward_days);
            used_days.extend(exam_week.exam_days.iter().copied());
            exam_week
        })
        .collect();

    exam_weeks.reverse();
    exam_weeks
}

fn shift_week(
    tag: ExamWeekTag,
    week: Week,
    holiday_set: &HolidaySet,
    used_days: &BTreeSet<NaiveDate>,
    maximum_backward_days: i64,
) -> ExamWeek
{
    let mut exam_days = Vec::with_capacity(EXAM_DAYS_PER_WEEK);
    let mut holidays: Vec<Holiday> = Vec::new();

    for day in week.working_days() {
        match holiday_set.blocking(day) {
            Some(holiday) => holidays.push(holiday.clone()),
            None if used_days.contains(&day) => {}
            None => exam_days.push(day),
        }
    }

    let mut cursor = week.monday() - TimeDelta::days(1);
    let earliest = week.monday() - TimeDelta::days(maximum_backward_days);
    while exam_days.len() < EXAM_DAYS_PER_WEEK && cursor >= earliest {
        if is_weekday(cursor) {
            match holiday_set.blocking(cursor) {
                Some(holiday) => holidays.push(holiday.clone()),
                None if used_days.contains(&cursor) => {}
                None => exam_days.push(cursor),
            }
        }
        cursor -= TimeDelta::days(1);
    }

    if exam_days.len() < EXAM_DAYS_PER_WEEK {
        event!(
            Level::WARN,
            exam_week = %tag,
            nominal_week = %week,
            exam_days = exam_days.len(),
            "exam week could not collect enough exam days"
        );
    }

    ExamWeek::new(tag, week, exam_days).with_holidays(holidays)
}
