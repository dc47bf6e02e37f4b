use super::SemesterOutcome;
use crate::ExportError;

pub fn render(semester_outcomes: &[SemesterOutcome]) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(semester_outcomes)?;
    json.push('\n');
    Ok(json)
}
