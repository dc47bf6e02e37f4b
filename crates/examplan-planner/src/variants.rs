use examplan_calendar_environment::plan::ConstraintViolation;
use examplan_calendar_environment::plan::Plan;
use examplan_calendar_environment::plan::PlanVariant;
use itertools::Itertools;
use tracing::Level;
use tracing::event;

use crate::annotations::annotate;
use crate::evaluation::Candidate;
use crate::evaluation::PlanningContext;

/// Turns the evaluated candidates into the plans of a semester.
///
/// A single plan is returned when any candidate, the standard placement
/// included, satisfies every constraint. The best of those by objective value
/// and shift magnitude wins. Otherwise the standard placement comes first,
/// followed by the best adjusted candidates whose violations differ from
/// every plan listed before them.
pub fn select_plans(
    planning_context: &PlanningContext,
    standard: Candidate,
    candidates: Vec<Candidate>,
) -> Vec<Plan>
{
    let ranked: Vec<Candidate> = candidates
        .into_iter()
        .sorted_by_key(rank)
        .collect();

    let best_valid = ranked
        .iter()
        .chain([&standard])
        .filter(|candidate| candidate.violations.is_empty())
        .min_by_key(|candidate| rank(candidate));

    if let Some(best) = best_valid {
        let variant = if best.shift.is_default() {
            PlanVariant::Standard
        } else {
            PlanVariant::Optimized
        };
        event!(
            Level::INFO,
            variant = %variant,
            first_block_shift = best.shift.first_block,
            last_block_shift = best.shift.last_block,
            "found a plan without violations"
        );
        return vec![into_plan(planning_context, best, variant)];
    }

    let mut listed_violations: Vec<&[ConstraintViolation]> = vec![&standard.violations];
    let mut attempts: Vec<&Candidate> = Vec::new();
    for candidate in &ranked {
        if attempts.len() >= planning_context.parameters.maximum_optimization_attempts {
            break;
        }
        if candidate.shift.is_default() || candidate.exam_weeks == standard.exam_weeks {
            continue;
        }
        if listed_violations.contains(&candidate.violations.as_slice()) {
            continue;
        }
        listed_violations.push(&candidate.violations);
        attempts.push(candidate);
    }

    event!(
        Level::INFO,
        standard_violations = standard.violations.len(),
        optimization_attempts = attempts.len(),
        "no placement satisfies every constraint"
    );

    let mut plans = vec![into_plan(planning_context, &standard, PlanVariant::Standard)];
    plans.extend(attempts.into_iter().enumerate().map(|(index, candidate)| {
        into_plan(
            planning_context,
            candidate,
            PlanVariant::OptimizationAttempt(index + 1),
        )
    }));
    plans
}

fn rank(candidate: &Candidate) -> (u64, u64)
{
    (
        candidate.objective_value.objective_value,
        candidate.shift.magnitude(),
    )
}

fn into_plan(
    planning_context: &PlanningContext,
    candidate: &Candidate,
    variant: PlanVariant,
) -> Plan
{
    Plan {
        variant,
        exam_weeks: annotate(
            planning_context,
            &candidate.statistics,
            &candidate.exam_weeks,
        ),
        violations: candidate.violations.clone(),
        statistics: candidate.statistics,
        objective_value: candidate.objective_value.objective_value,
    }
}
