use chrono::NaiveDate;
use chrono::TimeDelta;
use examplan_calendar_environment::exam_week::ExamWeek;
use examplan_calendar_environment::plan::SemesterPlans;

use super::ExportContext;
use super::SemesterOutcome;

/// Content lines longer than this are folded (RFC 5545, 3.1).
const MAXIMUM_LINE_OCTETS: usize = 75;

const UID_DOMAIN: &str = "examplan";

/// One all-day event per exam week of the recommended plan of every planned
/// semester. Unavailable semesters are left out.
pub fn render(export_context: &ExportContext, semester_outcomes: &[SemesterOutcome]) -> String {
    let mut content_lines = vec![
        "BEGIN:VCALENDAR".to_owned(),
        "VERSION:2.0".to_owned(),
        format!("PRODID:{}", export_context.output.calendar_product_id),
        "CALSCALE:GREGORIAN".to_owned(),
        "METHOD:PUBLISH".to_owned(),
    ];

    for semester_outcome in semester_outcomes {
        if let SemesterOutcome::Planned(semester_plans) = semester_outcome {
            content_lines.extend(semester_events(export_context.reference_date, semester_plans));
        }
    }

    content_lines.push("END:VCALENDAR".to_owned());

    content_lines
        .iter()
        .map(|content_line| fold(content_line) + "\r\n")
        .collect()
}

fn semester_events(reference_date: NaiveDate, semester_plans: &SemesterPlans) -> Vec<String> {
    let Some(plan) = semester_plans.recommended() else {
        return Vec::new();
    };

    plan.exam_weeks
        .iter()
        .enumerate()
        .filter_map(|(index, exam_week)| {
            exam_week_event(reference_date, semester_plans, index + 1, exam_week)
        })
        .flatten()
        .collect()
}

fn exam_week_event(
    reference_date: NaiveDate,
    semester_plans: &SemesterPlans,
    number: usize,
    exam_week: &ExamWeek,
) -> Option<Vec<String>> {
    let first_day = exam_week.first_day()?;
    let last_day = exam_week.last_day()?;
    let semester = &semester_plans.semester;

    let mut event = vec![
        "BEGIN:VEVENT".to_owned(),
        format!(
            "UID:{}-{}@{}",
            semester.id().slug(),
            exam_week.tag.to_string().to_lowercase(),
            UID_DOMAIN
        ),
        format!("DTSTAMP:{}T000000Z", reference_date.format("%Y%m%d")),
        format!("DTSTART;VALUE=DATE:{}", first_day.format("%Y%m%d")),
        format!(
            "DTEND;VALUE=DATE:{}",
            (last_day + TimeDelta::days(1)).format("%Y%m%d")
        ),
        format!(
            "SUMMARY:{}",
            escape_text(&format!("Prüfungswoche {} {}", number, semester.name()))
        ),
    ];

    let notes = exam_week.notes_string();
    if !notes.is_empty() {
        event.push(format!("DESCRIPTION:{}", escape_text(&notes)));
    }
    event.push("END:VEVENT".to_owned());

    Some(event)
}

pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(character),
        }
    }
    escaped
}

/// Splits a content line into lines of at most 75 octets without breaking a
/// UTF-8 sequence. Continuation lines start with a single space.
pub fn fold(content_line: &str) -> String {
    let mut folded = String::with_capacity(content_line.len() + content_line.len() / 25);
    let mut line_octets = 0;
    for character in content_line.chars() {
        let width = character.len_utf8();
        if line_octets + width > MAXIMUM_LINE_OCTETS {
            folded.push_str("\r\n ");
            line_octets = 1;
        }
        folded.push(character);
        line_octets += width;
    }
    folded
}

#[cfg(test)]
mod tests {
    use examplan_configuration::PlannerConfiguration;

    use super::*;
    use crate::exports::fixtures::date;
    use crate::exports::fixtures::winter_2026;

    fn render_winter_2026() -> String {
        let planner_configuration = PlannerConfiguration::default();
        let export_context = ExportContext::new(&planner_configuration, date(2026, 10, 18));
        render(&export_context, &[SemesterOutcome::Planned(winter_2026())])
    }

    #[test]
    fn test_calendar_envelope() {
        let calendar = render_winter_2026();

        assert!(calendar.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(calendar.ends_with("END:VCALENDAR\r\n"));
        assert_eq!(calendar.matches("BEGIN:VEVENT").count(), 4);
        assert!(!calendar.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_exam_week_event() {
        let calendar = render_winter_2026();

        assert!(calendar.contains(
            "UID:ws2026-p3@examplan\r\n\
             DTSTAMP:20261018T000000Z\r\n\
             DTSTART;VALUE=DATE:20270205\r\n\
             DTEND;VALUE=DATE:20270213\r\n\
             SUMMARY:Prüfungswoche 4 Wintersemester 2026/27\r\n\
             DESCRIPTION:Karnevalswoche\r\n"
        ));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render_winter_2026(), render_winter_2026());
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text("HIP-Woche; Warnung, Puffer\\n"),
            "HIP-Woche\\; Warnung\\, Puffer\\\\n"
        );
    }

    #[test]
    fn test_fold_long_lines() {
        let content_line = format!("DESCRIPTION:{}", "a".repeat(100));

        let folded = fold(&content_line);
        let lines: Vec<&str> = folded.split("\r\n").collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 75);
        assert!(lines[1].starts_with(' '));
        assert_eq!(lines.concat().len(), content_line.len() + 1);
    }

    #[test]
    fn test_fold_keeps_multibyte_characters_intact() {
        let content_line = format!("SUMMARY:{}", "ü".repeat(60));

        let folded = fold(&content_line);

        for line in folded.split("\r\n") {
            assert!(line.len() <= 75);
        }
        assert_eq!(folded.replace("\r\n ", ""), content_line);
    }
}
