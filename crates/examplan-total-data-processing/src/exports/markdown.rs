use std::fmt::Write;

use chrono::TimeDelta;
use examplan_calendar_environment::plan::Plan;
use examplan_calendar_environment::plan::SemesterPlans;
use examplan_calendar_environment::time_environment::DateRange;
use examplan_calendar_environment::time_environment::week::Week;
use examplan_configuration::school_holidays::relevant_school_holidays;
use itertools::Itertools;

use super::ExportContext;
use super::SemesterOutcome;
use crate::ExportError;

const RECOMMENDED: &str = "**Empfohlene Variante** (im Kalender eingetragen)\n\n";
const TABLE_HEADER: &str = "| Prüfungswoche | Zeitraum | Feiertage | Anmerkungen |\n| --- | --- | --- | --- |\n";

// `write!` into a `String` cannot fail, the results are discarded.
pub fn render(
    export_context: &ExportContext,
    semester_outcomes: &[SemesterOutcome],
) -> Result<String, ExportError> {
    let mut markdown = format!("# {}\n\n", export_context.output.title);

    for semester_outcome in semester_outcomes {
        match semester_outcome {
            SemesterOutcome::Planned(semester_plans) => {
                render_semester(&mut markdown, export_context, semester_plans)?
            }
            SemesterOutcome::Unavailable { semester, reason } => {
                let _ = write!(
                    markdown,
                    "## {}\n\nKeine Planung möglich: {}\n\n",
                    semester, reason
                );
            }
        }
    }

    Ok(markdown)
}

fn render_semester(
    markdown: &mut String,
    export_context: &ExportContext,
    semester_plans: &SemesterPlans,
) -> Result<(), ExportError> {
    let semester = &semester_plans.semester;

    let _ = write!(markdown, "## {}", semester.name());
    if semester.is_proposal() {
        markdown.push_str(" (VORSCHLAG)");
    }
    let _ = write!(
        markdown,
        "\n\nVorlesungszeit: {}\n\n",
        semester.lecture_period()
    );

    if semester_plans.has_alternatives() {
        let recommended = semester_plans.recommended();
        for plan in &semester_plans.plans {
            let _ = write!(markdown, "### {}\n\n", plan.variant);
            if recommended.is_some_and(|recommended| std::ptr::eq(recommended, plan)) {
                markdown.push_str(RECOMMENDED);
            }
            render_plan(markdown, plan);
        }
    } else {
        for plan in &semester_plans.plans {
            render_plan(markdown, plan);
        }
    }

    let school_holidays = relevant_school_holidays(
        export_context.school_holidays,
        semester.year(),
        semester.kind(),
    );
    if !school_holidays.is_empty() {
        markdown.push_str("Ferientermine NRW:\n");
        for school_holiday in school_holidays {
            let _ = writeln!(
                markdown,
                "- {}: {} - {}",
                school_holiday.name,
                school_holiday.start.format("%d.%m.%Y"),
                school_holiday.end.format("%d.%m.%Y")
            );
        }
        markdown.push('\n');
    }

    let visible_range = visible_range(semester_plans);
    let holiday_set = export_context
        .holiday_calendar
        .holiday_set(visible_range.years())?;
    let weekday_holidays = holiday_set.weekday_holidays_in(&visible_range);
    if !weekday_holidays.is_empty() {
        markdown.push_str("Feiertage (unter der Woche):\n");
        for holiday in weekday_holidays {
            let _ = writeln!(
                markdown,
                "- {} ({})",
                holiday.date.format("%d.%m.%Y"),
                holiday.name
            );
        }
        markdown.push('\n');
    }

    Ok(())
}

fn render_plan(markdown: &mut String, plan: &Plan) {
    if !plan.violations.is_empty() {
        markdown.push_str("**VERLETZTE BEDINGUNGEN:**\n");
        for violation in &plan.violations {
            let _ = writeln!(markdown, "- {}", violation);
        }
        markdown.push('\n');
    }

    let _ = write!(
        markdown,
        "Anzahl Vorlesungswochen: {}\nVorlesungswochen vor HIP: {}\nVorlesungswochen nach HIP: {}\n\n",
        plan.statistics.lecture_weeks,
        plan.statistics.weeks_before_hip,
        plan.statistics.weeks_after_hip
    );

    markdown.push_str(TABLE_HEADER);
    for (index, exam_week) in plan.exam_weeks.iter().enumerate() {
        let _ = writeln!(
            markdown,
            "| {} | {} | {} | {} |",
            index + 1,
            exam_week.period_string(),
            exam_week.holidays_string(),
            exam_week.notes_string()
        );
    }
    markdown.push('\n');
}

/// From the Monday of the earliest lecture or exam day to the Sunday of the
/// latest one, over every plan of the semester.
fn visible_range(semester_plans: &SemesterPlans) -> DateRange {
    let semester = &semester_plans.semester;
    let exam_days = semester_plans
        .plans
        .iter()
        .flat_map(|plan| plan.exam_weeks.iter())
        .flat_map(|exam_week| exam_week.exam_days.iter().copied());

    let (first, last) = exam_days
        .chain([semester.lecture_start(), semester.lecture_end()])
        .minmax()
        .into_option()
        .unwrap_or((semester.lecture_start(), semester.lecture_end()));

    let start = Week::containing(first).monday();
    let end = Week::containing(last).monday() + TimeDelta::days(6);
    DateRange::new(start, end).unwrap_or(*semester.lecture_period())
}
