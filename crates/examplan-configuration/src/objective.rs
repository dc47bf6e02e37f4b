use serde::Deserialize;
use serde::Serialize;

/// Penalties used to rank candidate placements.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ObjectiveWeights {
    pub easter_week: u64,
    pub lecture_weeks: u64,
    /// Charged per week of deviation from the target buffer, on each side.
    pub buffer_deviation: u64,
    pub gap_to_lecture_period: u64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            easter_week: 1000,
            lecture_weeks: 500,
            buffer_deviation: 50,
            gap_to_lecture_period: 1000,
        }
    }
}
