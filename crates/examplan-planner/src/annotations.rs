use examplan_calendar_environment::exam_week::Annotation;
use examplan_calendar_environment::exam_week::ExamWeek;
use examplan_calendar_environment::exam_week::ExamWeekTag;
use examplan_calendar_environment::plan::PlanStatistics;
use examplan_calendar_environment::time_environment::week::Week;
use examplan_configuration::constraints::BufferPolicy;

use crate::evaluation::PlanningContext;

/// Adds the notes shown next to each exam week. Annotations are only added
/// when their condition holds. Buffer notes follow the buffer policy, so an
/// exact policy also flags buffers that are too long.
pub fn annotate(
    planning_context: &PlanningContext,
    statistics: &PlanStatistics,
    exam_weeks: &[ExamWeek],
) -> Vec<ExamWeek>
{
    let target = planning_context.parameters.target_buffer_weeks;
    let flags_buffer = |weeks: usize| match planning_context.parameters.buffer_policy {
        BufferPolicy::Minimum => weeks < target,
        BufferPolicy::Exact => weeks != target,
    };
    let last_of_first_block = exam_weeks
        .iter()
        .rposition(|exam_week| exam_week.tag.is_first_block());

    exam_weeks
        .iter()
        .enumerate()
        .map(|(index, exam_week)| {
            let mut exam_week = exam_week.clone();

            let in_carnival = exam_week.exam_days.iter().any(|day| {
                planning_context
                    .holiday_set
                    .is_carnival_week(&Week::containing(*day))
            });
            if in_carnival {
                exam_week.annotate(Annotation::Karneval);
            }

            if exam_week.tag == ExamWeekTag::P2 {
                exam_week.annotate(Annotation::Hip(planning_context.hip_week.status()));
            }

            if Some(index) == last_of_first_block && flags_buffer(statistics.weeks_before_hip) {
                exam_week.annotate(Annotation::BufferBeforeHip {
                    weeks: statistics.weeks_before_hip,
                    target,
                });
            }

            if exam_week.tag == ExamWeekTag::P3 && flags_buffer(statistics.weeks_after_hip) {
                exam_week.annotate(Annotation::BufferAfterHip {
                    weeks: statistics.weeks_after_hip,
                    target,
                });
            }

            if planning_context.touches_easter_week(&exam_week) {
                exam_week.annotate(Annotation::EasterWeek);
            }

            if exam_week.is_degraded() {
                exam_week.annotate(Annotation::Degraded {
                    exam_days: exam_week.exam_days.len(),
                });
            }

            exam_week
        })
        .collect()
}
