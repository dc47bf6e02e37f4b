use anyhow::Context;
use anyhow::Result;
use colored::Colorize;
use examplan_calendar_environment::holidays::HolidayKind;
use examplan_calendar_environment::time_environment::format_with_weekday;
use examplan_calendar_environment::time_environment::is_weekday;
use examplan_configuration::PlannerConfiguration;

pub fn execute(year: i32, planner_configuration: &PlannerConfiguration) -> Result<()> {
    let holidays = planner_configuration
        .holidays
        .holiday_calendar()
        .holidays_in_year(year)
        .with_context(|| format!("no holiday calendar for {}", year))?;

    for holiday in holidays {
        let line = format!("{}  {}", format_with_weekday(holiday.date), holiday.name);
        match holiday.kind {
            HolidayKind::Marker => println!("{}", line.dimmed()),
            _ if !is_weekday(holiday.date) => println!("{}", line.dimmed()),
            HolidayKind::Public => println!("{}", line),
            HolidayKind::Regional => println!("{}", line.bright_yellow()),
        }
    }
    Ok(())
}
