use examplan_calendar_environment::exam_week::ExamWeek;
use tracing::Level;
use tracing::event;

use crate::evaluation::PlanningContext;
use crate::placement::Block;
use crate::placement::Placement;

/// Moves a block out of the Easter week when the lecture weeks still reach
/// the minimum afterwards. The first block of a winter semester moves as a
/// whole and the HIP week stays where it is.
pub fn apply_easter_rule(
    planning_context: &PlanningContext,
    placement: Placement,
) -> (Placement, Vec<ExamWeek>)
{
    let mut placement = placement;
    let mut exam_weeks = planning_context.materialize(&placement);

    if !planning_context.parameters.easter_deferral {
        return (placement, exam_weeks);
    }

    for block in [Block::First, Block::Last] {
        if !touches_easter_week(planning_context, &exam_weeks, block) {
            continue;
        }

        let Some(deferred) = placement.deferred(block) else {
            event!(Level::INFO, block = ?block, "easter deferral would collide with the next block");
            continue;
        };

        let deferred_exam_weeks = planning_context.materialize(&deferred);
        let lecture_weeks = planning_context.lecture_weeks(&deferred_exam_weeks);

        if lecture_weeks < planning_context.parameters.minimum_lecture_weeks {
            event!(
                Level::INFO,
                block = ?block,
                lecture_weeks,
                "easter deferral rejected, too few lecture weeks"
            );
            continue;
        }
        if touches_easter_week(planning_context, &deferred_exam_weeks, block) {
            continue;
        }

        event!(Level::INFO, block = ?block, lecture_weeks, "block deferred out of the easter week");
        placement = deferred;
        exam_weeks = deferred_exam_weeks;
    }

    (placement, exam_weeks)
}

fn touches_easter_week(
    planning_context: &PlanningContext,
    exam_weeks: &[ExamWeek],
    block: Block,
) -> bool
{
    exam_weeks
        .iter()
        .filter(|exam_week| Block::from(exam_week.tag) == block)
        .any(|exam_week| planning_context.touches_easter_week(exam_week))
}
