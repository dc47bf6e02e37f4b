use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    Markdown,
    Ical,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Ical => "ics",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Output {
    pub directory: PathBuf,
    pub file_stem: String,
    pub title: String,
    pub formats: Vec<OutputFormat>,
    /// Identifies the producer in the calendar file.
    pub calendar_product_id: String,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("files"),
            file_stem: "exam_periods".to_owned(),
            title: "Vorschlag Prüfungszeiträume Informatik".to_owned(),
            formats: vec![OutputFormat::Markdown, OutputFormat::Ical],
            calendar_product_id: "-//TH Koeln Exam Periods//examplan//DE".to_owned(),
        }
    }
}

impl Output {
    pub fn path_for(&self, format: OutputFormat) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.file_stem, format.extension()))
    }
}
