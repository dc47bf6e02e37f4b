pub mod constraints;
pub mod holidays;
pub mod objective;
pub mod output;
pub mod rules;
pub mod school_holidays;
pub mod search;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use self::constraints::Constraints;
use self::holidays::Holidays;
use self::objective::ObjectiveWeights;
use self::output::Output;
use self::rules::Rules;
use self::school_holidays::SchoolHoliday;
use self::search::Search;

pub const CONFIGURATION_VARIABLE: &str = "EXAMPLAN_CONFIGURATION";

/// Every setting of a planning run. All sections are optional in the TOML
/// file, missing values fall back to the TH Köln rules.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PlannerConfiguration {
    pub constraints: Constraints,
    pub search: Search,
    pub objective: ObjectiveWeights,
    pub rules: Rules,
    pub holidays: Holidays,
    pub school_holidays: Vec<SchoolHoliday>,
    pub output: Output,
}

impl PlannerConfiguration {
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("could not read configuration file {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let configuration: PlannerConfiguration = toml::from_str(contents)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Resolution order: explicit path, then the `EXAMPLAN_CONFIGURATION`
    /// variable (a `.env` file is honored), then the built-in defaults.
    pub fn resolve(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::read(path);
        }

        match dotenvy::var(CONFIGURATION_VARIABLE) {
            Ok(path) => Self::read(&PathBuf::from(path)),
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(Self::default()),
            Err(error) => Err(error)
                .with_context(|| format!("could not read {}", CONFIGURATION_VARIABLE)),
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.search.earliest_first_block_shift <= self.search.latest_first_block_shift,
            "search.earliest_first_block_shift must not exceed search.latest_first_block_shift"
        );
        anyhow::ensure!(
            self.search.latest_last_block_shift >= 0,
            "search.latest_last_block_shift must not be negative"
        );
        anyhow::ensure!(
            self.search.hip_buffer_candidates.0 <= self.search.hip_buffer_candidates.1,
            "search.hip_buffer_candidates must be an ascending pair"
        );
        anyhow::ensure!(
            self.search.maximum_backward_days >= 0,
            "search.maximum_backward_days must not be negative"
        );
        for school_holiday in &self.school_holidays {
            anyhow::ensure!(
                school_holiday.start <= school_holiday.end,
                "school holiday '{}' ends before it starts",
                school_holiday.name
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::constraints::BufferPolicy;
    use crate::output::OutputFormat;
    use crate::rules::RuleOrder;

    #[test]
    fn test_empty_file_gives_defaults() {
        let configuration = PlannerConfiguration::from_toml("").unwrap();

        assert_eq!(configuration, PlannerConfiguration::default());
        assert_eq!(configuration.constraints.minimum_lecture_weeks, 13);
        assert_eq!(configuration.constraints.target_buffer_weeks, 7);
        assert_eq!(configuration.search.first_block_shifts(), -2..=2);
        assert_eq!(configuration.search.last_block_shifts(), 0..=1);
        assert_eq!(configuration.rules.rule_order, RuleOrder::HolidayShiftFirst);
        assert_eq!(configuration.objective.easter_week, 1000);
    }

    #[test]
    fn test_partial_sections() {
        let configuration = PlannerConfiguration::from_toml(
            r#"
            [constraints]
            buffer_policy = "exact"

            [rules]
            rule_order = "easter_deferral_first"

            [holidays]
            christmas_eve_and_new_years_eve = false

            [[holidays.additional_closures]]
            date = "2026-12-28"
            name = "Betriebsruhe"

            [[school_holidays]]
            name = "Herbst"
            start = "2026-10-17"
            end = "2026-10-31"

            [output]
            formats = ["markdown", "json"]
            "#,
        )
        .unwrap();

        assert_eq!(configuration.constraints.buffer_policy, BufferPolicy::Exact);
        assert_eq!(configuration.constraints.minimum_lecture_weeks, 13);
        assert_eq!(
            configuration.rules.rule_order,
            RuleOrder::EasterDeferralFirst
        );
        assert!(configuration.rules.easter_deferral);
        assert_eq!(configuration.holidays.additional_closures.len(), 1);
        assert_eq!(
            configuration.school_holidays[0].start,
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
        );
        assert_eq!(configuration.output.formats, vec![
            OutputFormat::Markdown,
            OutputFormat::Json
        ]);
        assert_eq!(
            configuration.output.path_for(OutputFormat::Json),
            PathBuf::from("files/exam_periods.json")
        );
    }

    #[test]
    fn test_additional_closures_block_exams() {
        let configuration = PlannerConfiguration::from_toml(
            r#"
            [[holidays.additional_closures]]
            date = "2026-12-28"
            name = "Betriebsruhe"
            "#,
        )
        .unwrap();

        let holiday_set = configuration
            .holidays
            .holiday_calendar()
            .holiday_set(2026..=2026)
            .unwrap();

        let closure = holiday_set
            .blocking(NaiveDate::from_ymd_opt(2026, 12, 28).unwrap())
            .unwrap();
        assert_eq!(closure.name, "Betriebsruhe");
    }

    #[test]
    fn test_inverted_shift_window_is_rejected() {
        let result = PlannerConfiguration::from_toml(
            r#"
            [search]
            earliest_first_block_shift = 1
            latest_first_block_shift = -1
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = PlannerConfiguration::from_toml(
            r#"
            [constraints]
            buffer_policy = "approximately"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_policies_parse_from_strings() {
        assert_eq!("exact".parse::<BufferPolicy>().unwrap(), BufferPolicy::Exact);
        assert_eq!(
            "holiday_shift_first".parse::<RuleOrder>().unwrap(),
            RuleOrder::HolidayShiftFirst
        );
        assert_eq!(BufferPolicy::Minimum.to_string(), "minimum");
    }

    #[test]
    fn test_shipped_configuration() {
        let configuration =
            PlannerConfiguration::from_toml(include_str!("../../../configuration/planner.toml"))
                .unwrap();

        assert_eq!(configuration.constraints, PlannerConfiguration::default().constraints);
        assert_eq!(configuration.search, PlannerConfiguration::default().search);
        assert_eq!(configuration.school_holidays.len(), 21);
        assert_eq!(configuration.output.formats, vec![
            OutputFormat::Markdown,
            OutputFormat::Ical
        ]);
    }
}
