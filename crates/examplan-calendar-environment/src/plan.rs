use std::fmt::Display;
use std::fmt::{self};

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::exam_week::ExamWeek;
use crate::exam_week::ExamWeekTag;
use crate::hip_week::HipWeek;
use crate::semester::Semester;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanVariant
{
    /// The default placement: first block at lecture start, P3 at lecture end.
    Standard,
    /// An adjusted placement that satisfies every constraint.
    Optimized,
    /// An adjusted placement that still violates constraints. Numbered from 1.
    OptimizationAttempt(usize),
}

impl Display for PlanVariant
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            PlanVariant::Standard => write!(f, "Standard"),
            PlanVariant::Optimized => write!(f, "Optimiert"),
            PlanVariant::OptimizationAttempt(1) => write!(f, "Optimierungsversuch"),
            PlanVariant::OptimizationAttempt(attempt) => {
                write!(f, "Optimierungsversuch {}", attempt)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PlanStatistics
{
    pub lecture_weeks: usize,
    pub weeks_before_hip: usize,
    pub weeks_after_hip: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint
{
    MinimumLectureWeeks
    {
        minimum: usize
    },
    BufferBeforeHip
    {
        target: usize
    },
    BufferAfterHip
    {
        target: usize
    },
    NoGapToLecturePeriod,
    NoExamInEasterWeek,
}

/// A violated constraint together with the value that was measured.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintViolation
{
    pub constraint: Constraint,
    pub measured: usize,
}

impl ConstraintViolation
{
    pub fn new(constraint: Constraint, measured: usize) -> Self
    {
        Self {
            constraint,
            measured,
        }
    }
}

impl Display for ConstraintViolation
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let comparison = |target: usize| if self.measured < target { "<" } else { ">" };

        match self.constraint {
            Constraint::MinimumLectureWeeks { minimum } => {
                write!(f, "Vorlesungswochen < {} ({})", minimum, self.measured)
            }
            Constraint::BufferBeforeHip { target } => write!(
                f,
                "Wochen vor HIP {} {} ({})",
                comparison(target),
                target,
                self.measured
            ),
            Constraint::BufferAfterHip { target } => write!(
                f,
                "Wochen nach HIP {} {} ({})",
                comparison(target),
                target,
                self.measured
            ),
            Constraint::NoGapToLecturePeriod => {
                write!(f, "Lücke zur Vorlesungszeit ({})", self.measured)
            }
            Constraint::NoExamInEasterWeek => write!(f, "Prüfung in Osterwoche"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plan
{
    pub variant: PlanVariant,
    pub exam_weeks: Vec<ExamWeek>,
    pub violations: Vec<ConstraintViolation>,
    pub statistics: PlanStatistics,
    /// Lower is better. Only comparable between plans of the same semester.
    pub objective_value: u64,
}

impl Plan
{
    pub fn is_valid(&self) -> bool
    {
        self.violations.is_empty()
    }

    pub fn exam_week(&self, tag: ExamWeekTag) -> Option<&ExamWeek>
    {
        self.exam_weeks
            .iter()
            .find(|exam_week| exam_week.tag == tag)
    }

    pub fn hip_exam_week(&self) -> Option<&ExamWeek>
    {
        self.exam_week(ExamWeekTag::P2)
    }

    pub fn has_overlapping_exam_weeks(&self) -> bool
    {
        self.exam_weeks
            .iter()
            .tuple_windows()
            .any(|(earlier, later)| earlier.overlaps(later))
    }
}

/// The planner result for one semester. `plans` starts with the standard
/// placement whenever alternatives are listed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SemesterPlans
{
    pub semester: Semester,
    pub hip_week: HipWeek,
    pub plans: Vec<Plan>,
}

impl SemesterPlans
{
    /// The plan with the lowest objective value, the earlier one on ties.
    pub fn recommended(&self) -> Option<&Plan>
    {
        self.plans.iter().min_by_key(|plan| plan.objective_value)
    }

    pub fn has_alternatives(&self) -> bool
    {
        self.plans.len() > 1
    }
}
