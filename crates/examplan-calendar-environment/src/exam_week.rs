use std::fmt::Display;
use std::fmt::{self};

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::hip_week::HipStatus;
use crate::holidays::Holiday;
use crate::semester::SemesterKind;
use crate::time_environment::DateRange;
use crate::time_environment::format_with_weekday;
use crate::time_environment::week::Week;

pub const EXAM_DAYS_PER_WEEK: usize = 5;

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum_macros::Display,
)]
pub enum ExamWeekTag
{
    P1,
    P1a,
    P1b,
    P2,
    P3,
}

impl ExamWeekTag
{
    pub fn sequence(kind: SemesterKind) -> &'static [ExamWeekTag]
    {
        match kind {
            SemesterKind::Summer => &[ExamWeekTag::P1, ExamWeekTag::P2, ExamWeekTag::P3],
            SemesterKind::Winter => &[
                ExamWeekTag::P1a,
                ExamWeekTag::P1b,
                ExamWeekTag::P2,
                ExamWeekTag::P3,
            ],
        }
    }

    pub fn is_first_block(&self) -> bool
    {
        matches!(self, ExamWeekTag::P1 | ExamWeekTag::P1a | ExamWeekTag::P1b)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation
{
    Karneval,
    Hip(HipStatus),
    BufferBeforeHip
    {
        weeks: usize,
        target: usize,
    },
    BufferAfterHip
    {
        weeks: usize,
        target: usize,
    },
    EasterWeek,
    Degraded
    {
        exam_days: usize
    },
}

impl Display for Annotation
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Annotation::Karneval => write!(f, "Karnevalswoche"),
            Annotation::Hip(HipStatus::Fixed) => write!(f, "HIP-Woche"),
            Annotation::Hip(HipStatus::Proposed) => write!(f, "HIP-Woche (VORSCHLAG)"),
            Annotation::BufferBeforeHip { weeks, target } => {
                write!(f, "Warnung: Puffer vor HIP {}", buffer_length(*weeks, *target))
            }
            Annotation::BufferAfterHip { weeks, target } => {
                write!(f, "Warnung: Puffer nach HIP {}", buffer_length(*weeks, *target))
            }
            Annotation::EasterWeek => write!(f, "Osterwoche"),
            Annotation::Degraded { exam_days } => {
                write!(f, "Warnung: nur {} Prüfungstage", exam_days)
            }
        }
    }
}

fn buffer_length(weeks: usize, target: usize) -> String
{
    if weeks < target {
        format!("nur {} Wochen", weeks)
    } else {
        format!("{} statt {} Wochen", weeks, target)
    }
}

/// One placed exam week. `nominal_week` is the Monday–Friday week the planner
/// chose, `exam_days` are the days left after holiday shifting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExamWeek
{
    pub tag: ExamWeekTag,
    pub nominal_week: Week,
    pub exam_days: Vec<NaiveDate>,
    pub holidays: Vec<Holiday>,
    pub annotations: Vec<Annotation>,
}

impl ExamWeek
{
    pub fn new(tag: ExamWeekTag, nominal_week: Week, mut exam_days: Vec<NaiveDate>) -> Self
    {
        exam_days.sort();
        exam_days.dedup();
        Self {
            tag,
            nominal_week,
            exam_days,
            holidays: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_holidays(mut self, mut holidays: Vec<Holiday>) -> Self
    {
        holidays.sort();
        holidays.dedup();
        self.holidays = holidays;
        self
    }

    pub fn first_day(&self) -> Option<NaiveDate>
    {
        self.exam_days.first().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate>
    {
        self.exam_days.last().copied()
    }

    pub fn date_range(&self) -> Option<DateRange>
    {
        DateRange::new(self.first_day()?, self.last_day()?).ok()
    }

    pub fn is_degraded(&self) -> bool
    {
        self.exam_days.len() != EXAM_DAYS_PER_WEEK
    }

    pub fn contains_day(&self, date: NaiveDate) -> bool
    {
        self.exam_days.binary_search(&date).is_ok()
    }

    pub fn overlaps(&self, other: &ExamWeek) -> bool
    {
        match (self.date_range(), other.date_range()) {
            (Some(this), Some(that)) => this.overlaps(&that),
            _ => false,
        }
    }

    pub fn annotate(&mut self, annotation: Annotation)
    {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }

    /// `Mo 14.09.2026 - Fr 18.09.2026`
    pub fn period_string(&self) -> String
    {
        match (self.first_day(), self.last_day()) {
            (Some(first), Some(last)) => {
                format!("{} - {}", format_with_weekday(first), format_with_weekday(last))
            }
            _ => String::new(),
        }
    }

    pub fn holidays_string(&self) -> String
    {
        self.holidays
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn notes_string(&self) -> String
    {
        self.annotations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
