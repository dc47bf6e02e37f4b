use std::ops::RangeInclusive;

use examplan_configuration::PlannerConfiguration;
use examplan_configuration::constraints::BufferPolicy;
use examplan_configuration::objective::ObjectiveWeights;
use examplan_configuration::rules::RuleOrder;

/// The part of the configuration the planner reads, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerParameters
{
    pub minimum_lecture_weeks: usize,
    pub target_buffer_weeks: usize,
    pub buffer_policy: BufferPolicy,
    pub first_block_shifts: RangeInclusive<i64>,
    pub last_block_shifts: RangeInclusive<i64>,
    pub maximum_optimization_attempts: usize,
    pub hip_buffers: RangeInclusive<usize>,
    pub maximum_backward_days: i64,
    pub rule_order: RuleOrder,
    pub easter_deferral: bool,
    pub objective_weights: ObjectiveWeights,
}

impl PlannerParameters
{
    pub fn new(planner_configuration: &PlannerConfiguration) -> Self
    {
        let constraints = &planner_configuration.constraints;
        let search = &planner_configuration.search;
        let rules = &planner_configuration.rules;

        Self {
            minimum_lecture_weeks: constraints.minimum_lecture_weeks,
            target_buffer_weeks: constraints.target_buffer_weeks,
            buffer_policy: constraints.buffer_policy,
            first_block_shifts: search.first_block_shifts(),
            last_block_shifts: search.last_block_shifts(),
            maximum_optimization_attempts: search.maximum_optimization_attempts,
            hip_buffers: search.hip_buffers(),
            maximum_backward_days: search.maximum_backward_days,
            rule_order: rules.rule_order,
            easter_deferral: rules.easter_deferral,
            objective_weights: planner_configuration.objective,
        }
    }
}

impl Default for PlannerParameters
{
    fn default() -> Self
    {
        Self::new(&PlannerConfiguration::default())
    }
}
