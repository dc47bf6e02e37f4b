use std::ops::RangeInclusive;

use serde::Deserialize;
use serde::Serialize;

/// Bounds of the candidate search. Shifts are counted in weeks relative to the
/// default placement, negative values move a block earlier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Search {
    pub earliest_first_block_shift: i64,
    pub latest_first_block_shift: i64,
    pub latest_last_block_shift: i64,
    pub maximum_optimization_attempts: usize,
    /// Weeks between the first exam block and a proposed HIP week.
    pub hip_buffer_candidates: (usize, usize),
    /// How far the holiday shift may reach back before a week is degraded.
    pub maximum_backward_days: i64,
}

impl Default for Search {
    fn default() -> Self {
        Self {
            earliest_first_block_shift: -2,
            latest_first_block_shift: 2,
            latest_last_block_shift: 1,
            maximum_optimization_attempts: 1,
            hip_buffer_candidates: (6, 10),
            maximum_backward_days: 21,
        }
    }
}

impl Search {
    pub fn first_block_shifts(&self) -> RangeInclusive<i64> {
        self.earliest_first_block_shift..=self.latest_first_block_shift
    }

    pub fn last_block_shifts(&self) -> RangeInclusive<i64> {
        0..=self.latest_last_block_shift
    }

    pub fn hip_buffers(&self) -> RangeInclusive<usize> {
        self.hip_buffer_candidates.0..=self.hip_buffer_candidates.1
    }
}
