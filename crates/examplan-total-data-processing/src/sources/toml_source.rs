use std::path::PathBuf;

use examplan_calendar_environment::SemesterInput;
use examplan_calendar_environment::hip_week::HipWeek;
use examplan_calendar_environment::semester::Semester;
use examplan_calendar_environment::semester::SemesterId;
use serde::Deserialize;
use tracing::Level;
use tracing::event;

use super::CalendarSource;
use super::SourceData;
use super::date_parsing::parse_date_range;
use crate::DataAvailabilityError;
use crate::SourceError;

/// One `[[semester]]` table. Dates are kept as the text that was published,
/// e.g. `lecture_period = "28.09.2026 – 12.02.2027"`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SemesterEntry {
    pub name: String,
    pub lecture_period: Option<String>,
    pub hip_week: Option<String>,
    #[serde(default)]
    pub proposal: bool,
}

#[derive(Deserialize, Debug, Default)]
struct SemesterFile {
    #[serde(default, rename = "semester")]
    semesters: Vec<SemesterEntry>,
}

pub struct TomlSemesterSource {
    path: PathBuf,
}

impl TomlSemesterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CalendarSource for TomlSemesterSource {
    fn load(&self) -> Result<SourceData, SourceError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let source_data = parse_semesters(&contents).map_err(|source| SourceError::Toml {
            path: self.path.clone(),
            source,
        })?;

        event!(
            Level::INFO,
            path = %self.path.display(),
            semesters = source_data.semesters.len(),
            unavailable = source_data.unavailable.len(),
        );
        Ok(source_data)
    }
}

pub fn parse_semesters(contents: &str) -> Result<SourceData, toml::de::Error> {
    let semester_file: SemesterFile = toml::from_str(contents)?;

    let mut source_data = SourceData::default();
    for semester_entry in semester_file.semesters {
        match semester_entry.into_semester_input() {
            Ok(semester_input) => source_data.semesters.push(semester_input),
            Err(data_availability_error) => {
                event!(
                    Level::WARN,
                    semester = data_availability_error.semester(),
                    error = %data_availability_error,
                    "semester skipped"
                );
                source_data.unavailable.push(data_availability_error);
            }
        }
    }
    Ok(source_data)
}

impl SemesterEntry {
    pub fn into_semester_input(self) -> Result<SemesterInput, DataAvailabilityError> {
        let semester_id: SemesterId =
            self.name
                .parse()
                .map_err(|_| DataAvailabilityError::UnknownSemester {
                    semester: self.name.clone(),
                })?;

        let lecture_period_text =
            self.lecture_period
                .ok_or_else(|| DataAvailabilityError::MissingLecturePeriod {
                    semester: semester_id.to_string(),
                })?;
        let lecture_period = parse_date_range(&lecture_period_text).ok_or_else(|| {
            DataAvailabilityError::UnparsableDateRange {
                semester: semester_id.to_string(),
                value: lecture_period_text.clone(),
            }
        })?;

        let hip_week = match self.hip_week {
            Some(hip_week_text) => {
                let hip_range = parse_date_range(&hip_week_text).ok_or_else(|| {
                    DataAvailabilityError::UnparsableDateRange {
                        semester: semester_id.to_string(),
                        value: hip_week_text.clone(),
                    }
                })?;
                Some(HipWeek::announced(&hip_range))
            }
            None => None,
        };

        Ok(SemesterInput::new(
            Semester::new(semester_id, lecture_period, self.proposal),
            hip_week,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    const SEMESTERS: &str = r#"
        [[semester]]
        name = "Wintersemester 2026/27"
        lecture_period = "28.09.2026 – 12.02.2027"
        hip_week = "16.11. – 20.11.2026"

        [[semester]]
        name = "Sommersemester 2027"
        lecture_period = "29.03.2027 - 09.07.2027"

        [[semester]]
        name = "Sommersemester 2026"
    "#;

    #[test]
    fn test_parse_semesters() {
        let source_data = parse_semesters(SEMESTERS).unwrap();

        assert_eq!(source_data.semesters.len(), 2);
        let winter = &source_data.semesters[0];
        assert_eq!(winter.semester.lecture_start(), date(2026, 9, 28));
        assert_eq!(
            winter.hip_week.map(|hip_week| hip_week.week().monday()),
            Some(date(2026, 11, 16))
        );
        assert_eq!(source_data.semesters[1].hip_week, None);
    }

    #[test]
    fn test_missing_lecture_period_is_recorded() {
        let source_data = parse_semesters(SEMESTERS).unwrap();

        assert_eq!(
            source_data.unavailable,
            vec![DataAvailabilityError::MissingLecturePeriod {
                semester: "Sommersemester 2026".to_owned(),
            }]
        );
    }

    #[test]
    fn test_unparsable_hip_week() {
        let semester_entry = SemesterEntry {
            name: "Sommersemester 2027".to_owned(),
            lecture_period: Some("29.03.2027 - 09.07.2027".to_owned()),
            hip_week: Some("wird noch bekanntgegeben".to_owned()),
            proposal: false,
        };

        assert!(matches!(
            semester_entry.into_semester_input(),
            Err(DataAvailabilityError::UnparsableDateRange { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse_semesters("[[semester]\nname =").is_err());
    }
}
