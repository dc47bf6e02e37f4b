use std::fmt::Display;
use std::fmt::{self};

use serde::Deserialize;
use serde::Serialize;

use crate::time_environment::DateRange;
use crate::time_environment::week::Week;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HipStatus
{
    /// Officially announced by the university.
    Fixed,
    /// Computed by the planner because nothing has been announced yet.
    Proposed,
}

/// The interdisciplinary project week (HIP) of a semester.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HipWeek
{
    week: Week,
    status: HipStatus,
}

impl HipWeek
{
    pub fn new(week: Week, status: HipStatus) -> Self
    {
        Self { week, status }
    }

    /// Announcements are date ranges; the HIP is the week the range starts in.
    pub fn announced(range: &DateRange) -> Self
    {
        Self {
            week: Week::containing(range.start()),
            status: HipStatus::Fixed,
        }
    }

    pub fn proposed(week: Week) -> Self
    {
        Self {
            week,
            status: HipStatus::Proposed,
        }
    }

    pub fn week(&self) -> Week
    {
        self.week
    }

    pub fn status(&self) -> HipStatus
    {
        self.status
    }

    pub fn is_proposed(&self) -> bool
    {
        self.status == HipStatus::Proposed
    }
}

impl Display for HipWeek
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.status {
            HipStatus::Fixed => write!(f, "HIP-Woche"),
            HipStatus::Proposed => write!(f, "HIP-Woche (VORSCHLAG)"),
        }
    }
}
