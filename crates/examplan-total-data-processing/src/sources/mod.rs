pub mod date_parsing;
pub mod extrapolation;
pub mod toml_source;

use examplan_calendar_environment::SemesterInput;

use crate::DataAvailabilityError;
use crate::SourceError;

/// Everything a source could deliver. Semesters without usable data are kept
/// as errors so that they show up in the report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceData {
    pub semesters: Vec<SemesterInput>,
    pub unavailable: Vec<DataAvailabilityError>,
}

/// A provider of published lecture periods and HIP weeks.
pub trait CalendarSource {
    fn load(&self) -> Result<SourceData, SourceError>;
}
