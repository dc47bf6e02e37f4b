use chrono::TimeDelta;
use examplan_calendar_environment::exam_week::ExamWeekTag;
use examplan_calendar_environment::semester::Semester;
use examplan_calendar_environment::semester::SemesterKind;
use examplan_calendar_environment::time_environment::week::Week;

/// Offsets in weeks from the default placement. Negative values move a block
/// earlier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Shift
{
    pub first_block: i64,
    pub last_block: i64,
}

impl Shift
{
    pub fn new(first_block: i64, last_block: i64) -> Self
    {
        Self {
            first_block,
            last_block,
        }
    }

    pub fn is_default(&self) -> bool
    {
        self.first_block == 0 && self.last_block == 0
    }

    pub fn magnitude(&self) -> u64
    {
        self.first_block.unsigned_abs() + self.last_block.unsigned_abs()
    }
}

/// The nominal Monday to Friday weeks of one candidate, before any holiday
/// shifting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placement
{
    kind: SemesterKind,
    first_block: Vec<Week>,
    hip: Week,
    last_block: Week,
}

impl Placement
{
    /// First block at the lecture start week, the HIP week as given and the
    /// last block at the lecture end week.
    pub fn default_for(semester: &Semester, hip: Week) -> Self
    {
        let kind = semester.kind();
        let lecture_start_week = Week::containing(semester.lecture_start());

        let first_block = (0..kind.number_of_first_block_weeks())
            .map(|offset| lecture_start_week + TimeDelta::weeks(offset as i64))
            .collect();

        Self {
            kind,
            first_block,
            hip,
            last_block: Week::containing(semester.lecture_end()),
        }
    }

    pub fn shifted(&self, shift: Shift) -> Self
    {
        Self {
            kind: self.kind,
            first_block: self
                .first_block
                .iter()
                .map(|week| *week + TimeDelta::weeks(shift.first_block))
                .collect(),
            hip: self.hip,
            last_block: self.last_block + TimeDelta::weeks(shift.last_block),
        }
    }

    pub fn kind(&self) -> SemesterKind
    {
        self.kind
    }

    pub fn first_block(&self) -> &[Week]
    {
        &self.first_block
    }

    pub fn hip(&self) -> Week
    {
        self.hip
    }

    pub fn last_block(&self) -> Week
    {
        self.last_block
    }

    /// Tags and weeks in calendar order.
    pub fn tagged_weeks(&self) -> Vec<(ExamWeekTag, Week)>
    {
        let weeks = self
            .first_block
            .iter()
            .copied()
            .chain([self.hip, self.last_block]);

        ExamWeekTag::sequence(self.kind)
            .iter()
            .copied()
            .zip(weeks)
            .collect()
    }

    /// Moves a block one calendar week later. Returns `None` when the moved
    /// block would run into the block after it. The HIP week never moves.
    pub fn deferred(&self, block: Block) -> Option<Self>
    {
        let mut deferred = self.clone();
        match block {
            Block::First => {
                deferred.first_block = self
                    .first_block
                    .iter()
                    .map(|week| *week + TimeDelta::weeks(1))
                    .collect();
                let last_of_first_block = deferred.first_block.last()?;
                if *last_of_first_block >= deferred.hip {
                    return None;
                }
            }
            Block::Hip => return None,
            Block::Last => {
                deferred.last_block = self.last_block + TimeDelta::weeks(1);
            }
        }
        Some(deferred)
    }
}

/// Exam weeks that move together. P1a and P1b form one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block
{
    First,
    Hip,
    Last,
}

impl From<ExamWeekTag> for Block
{
    fn from(tag: ExamWeekTag) -> Self
    {
        match tag {
            ExamWeekTag::P1 | ExamWeekTag::P1a | ExamWeekTag::P1b => Block::First,
            ExamWeekTag::P2 => Block::Hip,
            ExamWeekTag::P3 => Block::Last,
        }
    }
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;
    use examplan_calendar_environment::semester::SemesterId;
    use examplan_calendar_environment::time_environment::DateRange;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn winter_2026() -> Semester
    {
        Semester::new(
            SemesterId::new(2026, SemesterKind::Winter),
            DateRange::new(date(2026, 9, 28), date(2027, 2, 12)).unwrap(),
            false,
        )
    }

    #[test]
    fn test_default_placement_winter()
    {
        let placement =
            Placement::default_for(&winter_2026(), Week::containing(date(2026, 11, 16)));

        let mondays: Vec<(ExamWeekTag, NaiveDate)> = placement
            .tagged_weeks()
            .into_iter()
            .map(|(tag, week)| (tag, week.monday()))
            .collect();

        assert_eq!(mondays, vec![
            (ExamWeekTag::P1a, date(2026, 9, 28)),
            (ExamWeekTag::P1b, date(2026, 10, 5)),
            (ExamWeekTag::P2, date(2026, 11, 16)),
            (ExamWeekTag::P3, date(2027, 2, 8)),
        ]);
    }

    #[test]
    fn test_shifted_keeps_hip()
    {
        let placement =
            Placement::default_for(&winter_2026(), Week::containing(date(2026, 11, 16)));

        let shifted = placement.shifted(Shift::new(-2, 1));

        assert_eq!(shifted.first_block()[0].monday(), date(2026, 9, 14));
        assert_eq!(shifted.first_block()[1].monday(), date(2026, 9, 21));
        assert_eq!(shifted.hip(), placement.hip());
        assert_eq!(shifted.last_block().monday(), date(2027, 2, 15));
        assert_eq!(Shift::new(-2, 1).magnitude(), 3);
    }

    #[test]
    fn test_deferral_into_hip_is_rejected()
    {
        let semester = winter_2026();
        let placement = Placement::default_for(&semester, Week::containing(date(2026, 10, 12)));

        assert!(placement.deferred(Block::First).is_none());
        assert!(placement.deferred(Block::Hip).is_none());
        assert_eq!(
            placement.deferred(Block::Last).unwrap().last_block().monday(),
            date(2027, 2, 15)
        );
    }
}
