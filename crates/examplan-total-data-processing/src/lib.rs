pub mod exports;
pub mod sources;

use std::path::PathBuf;

use examplan_calendar_environment::CalendarError;
use thiserror::Error;

/// A single semester that cannot be planned. Other semesters of the same
/// source are unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataAvailabilityError {
    #[error("'{semester}' is not a semester name like 'Sommersemester 2027'")]
    UnknownSemester { semester: String },
    #[error("no lecture period available")]
    MissingLecturePeriod { semester: String },
    #[error("'{value}' is not a date range like '28.09.2026 – 12.02.2027'")]
    UnparsableDateRange { semester: String, value: String },
}

impl DataAvailabilityError {
    pub fn semester(&self) -> &str {
        match self {
            DataAvailabilityError::UnknownSemester { semester }
            | DataAvailabilityError::MissingLecturePeriod { semester }
            | DataAvailabilityError::UnparsableDateRange { semester, .. } => semester,
        }
    }
}

/// The source as a whole could not be read.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not read semester file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("semester file {} is not valid TOML", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("could not serialize the plans")]
    Json(#[from] serde_json::Error),
}
