use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

/// How the buffer between the first exam block, the HIP week and the last
/// exam block is checked.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BufferPolicy {
    /// Only a buffer shorter than the target is a violation.
    #[default]
    Minimum,
    /// Every deviation from the target is a violation.
    Exact,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Constraints {
    pub minimum_lecture_weeks: usize,
    pub target_buffer_weeks: usize,
    pub buffer_policy: BufferPolicy,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            minimum_lecture_weeks: 13,
            target_buffer_weeks: 7,
            buffer_policy: BufferPolicy::Minimum,
        }
    }
}
