use examplan_calendar_environment::exam_week::ExamWeek;
use examplan_calendar_environment::hip_week::HipWeek;
use examplan_calendar_environment::holidays::HolidaySet;
use examplan_calendar_environment::plan::Constraint;
use examplan_calendar_environment::plan::ConstraintViolation;
use examplan_calendar_environment::plan::PlanStatistics;
use examplan_calendar_environment::semester::Semester;
use examplan_calendar_environment::time_environment::week::Week;
use examplan_configuration::constraints::BufferPolicy;
use examplan_configuration::objective::ObjectiveWeights;
use examplan_configuration::rules::RuleOrder;
use tracing::Level;
use tracing::event;

use crate::easter_rule::apply_easter_rule;
use crate::holiday_shift::materialize;
use crate::lecture_weeks::LectureWeekCounter;
use crate::parameters::PlannerParameters;
use crate::placement::Placement;
use crate::placement::Shift;

/// Every component is a `(weight, amount)` pair, `objective_value` is the
/// weighted sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanObjectiveValue
{
    pub objective_value: u64,
    pub easter_week: (u64, u64),
    pub lecture_weeks: (u64, u64),
    pub buffer_deviation: (u64, u64),
    pub gap_to_lecture_period: (u64, u64),
}

impl PlanObjectiveValue
{
    pub fn new(objective_weights: &ObjectiveWeights) -> Self
    {
        Self {
            objective_value: 0,
            easter_week: (objective_weights.easter_week, 0),
            lecture_weeks: (objective_weights.lecture_weeks, 0),
            buffer_deviation: (objective_weights.buffer_deviation, 0),
            gap_to_lecture_period: (objective_weights.gap_to_lecture_period, 0),
        }
    }

    pub fn aggregate_objectives(&mut self)
    {
        self.objective_value = self.easter_week.0 * self.easter_week.1
            + self.lecture_weeks.0 * self.lecture_weeks.1
            + self.buffer_deviation.0 * self.buffer_deviation.1
            + self.gap_to_lecture_period.0 * self.gap_to_lecture_period.1;
    }
}

/// A fully evaluated placement.
#[derive(Debug, Clone)]
pub struct Candidate
{
    pub shift: Shift,
    pub placement: Placement,
    pub exam_weeks: Vec<ExamWeek>,
    pub statistics: PlanStatistics,
    pub violations: Vec<ConstraintViolation>,
    pub objective_value: PlanObjectiveValue,
}

/// Everything the planner needs to evaluate placements of one semester.
pub struct PlanningContext<'a>
{
    pub semester: &'a Semester,
    pub hip_week: HipWeek,
    pub holiday_set: &'a HolidaySet,
    pub parameters: &'a PlannerParameters,
}

impl PlanningContext<'_>
{
    pub fn default_placement(&self) -> Placement
    {
        Placement::default_for(self.semester, self.hip_week.week())
    }

    pub fn materialize(&self, placement: &Placement) -> Vec<ExamWeek>
    {
        materialize(
            placement,
            self.holiday_set,
            self.parameters.maximum_backward_days,
        )
    }

    pub fn lecture_weeks(&self, exam_weeks: &[ExamWeek]) -> usize
    {
        LectureWeekCounter::new(self.semester, exam_weeks).total()
    }

    /// With the holiday shift first the exam days decide, otherwise the
    /// nominal week does.
    pub fn touches_easter_week(&self, exam_week: &ExamWeek) -> bool
    {
        match self.parameters.rule_order {
            RuleOrder::HolidayShiftFirst => exam_week
                .exam_days
                .iter()
                .any(|day| self.holiday_set.is_easter_week(&Week::containing(*day))),
            RuleOrder::EasterDeferralFirst => {
                self.holiday_set.is_easter_week(&exam_week.nominal_week)
            }
        }
    }

    pub fn evaluate(&self, shift: Shift) -> Candidate
    {
        let placement = self.default_placement().shifted(shift);
        let (placement, exam_weeks) = apply_easter_rule(self, placement);
        let statistics = LectureWeekCounter::new(self.semester, &exam_weeks).statistics(&exam_weeks);

        let weeks_in_easter = exam_weeks
            .iter()
            .filter(|exam_week| self.touches_easter_week(exam_week))
            .count();
        let gap_weeks = self.gap_weeks(&placement);

        let violations = self.violations(&statistics, gap_weeks, weeks_in_easter);

        let target = self.parameters.target_buffer_weeks;
        let mut objective_value = PlanObjectiveValue::new(&self.parameters.objective_weights);
        objective_value.easter_week.1 = u64::from(weeks_in_easter > 0);
        objective_value.lecture_weeks.1 =
            u64::from(statistics.lecture_weeks < self.parameters.minimum_lecture_weeks);
        objective_value.buffer_deviation.1 = (statistics.weeks_before_hip.abs_diff(target)
            + statistics.weeks_after_hip.abs_diff(target))
            as u64;
        objective_value.gap_to_lecture_period.1 = u64::from(gap_weeks > 0);
        objective_value.aggregate_objectives();

        event!(
            Level::DEBUG,
            first_block_shift = shift.first_block,
            last_block_shift = shift.last_block,
            objective_value = objective_value.objective_value,
            statistics = ?statistics,
            number_of_violations = violations.len(),
        );

        Candidate {
            shift,
            placement,
            exam_weeks,
            statistics,
            violations,
            objective_value,
        }
    }

    /// Full weeks between the first block and the lecture start plus full
    /// weeks between the lecture end and the last block.
    pub fn gap_weeks(&self, placement: &Placement) -> usize
    {
        let lecture_start_week = Week::containing(self.semester.lecture_start());
        let lecture_end_week = Week::containing(self.semester.lecture_end());

        let before_start = placement
            .first_block()
            .last()
            .map(|week| week.weeks_until(&lecture_start_week) - 1)
            .unwrap_or(0);
        let after_end = lecture_end_week.weeks_until(&placement.last_block()) - 1;

        (before_start.max(0) + after_end.max(0)) as usize
    }

    fn violations(
        &self,
        statistics: &PlanStatistics,
        gap_weeks: usize,
        weeks_in_easter: usize,
    ) -> Vec<ConstraintViolation>
    {
        let minimum_lecture_weeks = self.parameters.minimum_lecture_weeks;
        let target = self.parameters.target_buffer_weeks;
        let violates_buffer = |weeks: usize| match self.parameters.buffer_policy {
            BufferPolicy::Minimum => weeks < target,
            BufferPolicy::Exact => weeks != target,
        };

        let mut violations = Vec::new();
        if statistics.lecture_weeks < minimum_lecture_weeks {
            violations.push(ConstraintViolation::new(
                Constraint::MinimumLectureWeeks {
                    minimum: minimum_lecture_weeks,
                },
                statistics.lecture_weeks,
            ));
        }
        if violates_buffer(statistics.weeks_before_hip) {
            violations.push(ConstraintViolation::new(
                Constraint::BufferBeforeHip { target },
                statistics.weeks_before_hip,
            ));
        }
        if violates_buffer(statistics.weeks_after_hip) {
            violations.push(ConstraintViolation::new(
                Constraint::BufferAfterHip { target },
                statistics.weeks_after_hip,
            ));
        }
        if gap_weeks > 0 {
            violations.push(ConstraintViolation::new(
                Constraint::NoGapToLecturePeriod,
                gap_weeks,
            ));
        }
        if weeks_in_easter > 0 {
            violations.push(ConstraintViolation::new(
                Constraint::NoExamInEasterWeek,
                weeks_in_easter,
            ));
        }
        violations
    }
}
