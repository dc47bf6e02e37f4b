use chrono::TimeDelta;
use examplan_calendar_environment::hip_week::HipStatus;
use examplan_calendar_environment::hip_week::HipWeek;
use examplan_calendar_environment::holidays::HolidaySet;
use examplan_calendar_environment::semester::Semester;
use examplan_calendar_environment::time_environment::week::Week;
use tracing::Level;
use tracing::event;

use crate::holiday_shift::materialize;
use crate::lecture_weeks::LectureWeekCounter;
use crate::parameters::PlannerParameters;
use crate::placement::Placement;

/// The HIP week by the plain rule: the target buffer after the default first
/// block.
pub fn default_hip_week(semester: &Semester, target_buffer_weeks: usize) -> HipWeek
{
    let offset = semester.kind().number_of_first_block_weeks() + target_buffer_weeks;
    HipWeek::new(
        Week::containing(semester.lecture_start() + TimeDelta::weeks(offset as i64)),
        HipStatus::Fixed,
    )
}

/// Tries every buffer of `hip_buffers` after the default first block and
/// keeps the HIP week whose buffers are closest to the target on both sides.
/// The first candidate wins ties. `None` only for an empty buffer range.
pub fn propose_hip_week(
    semester: &Semester,
    holiday_set: &HolidaySet,
    parameters: &PlannerParameters,
) -> Option<HipWeek>
{
    let target = parameters.target_buffer_weeks;
    let number_of_first_block_weeks = semester.kind().number_of_first_block_weeks();

    let mut best: Option<(usize, Week)> = None;
    for buffer in parameters.hip_buffers.clone() {
        let hip = Week::containing(
            semester.lecture_start()
                + TimeDelta::weeks((number_of_first_block_weeks + buffer) as i64),
        );
        let placement = Placement::default_for(semester, hip);
        let exam_weeks = materialize(&placement, holiday_set, parameters.maximum_backward_days);
        let statistics = LectureWeekCounter::new(semester, &exam_weeks).statistics(&exam_weeks);

        let score = statistics.weeks_before_hip.abs_diff(target) * 100
            + statistics.weeks_after_hip.abs_diff(target) * 100
            + statistics
                .weeks_before_hip
                .abs_diff(statistics.weeks_after_hip);

        event!(Level::DEBUG, hip_week = %hip, buffer, score, statistics = ?statistics);

        if best.is_none_or(|(best_score, _)| score < best_score) {
            best = Some((score, hip));
        }
    }

    best.map(|(_, hip)| HipWeek::proposed(hip))
}
