use anyhow::Result;
use colored::Colorize;
use examplan_calendar_environment::holidays::easter_sunday;
use examplan_calendar_environment::holidays::easter_week;
use examplan_calendar_environment::holidays::rosenmontag;
use examplan_calendar_environment::holidays::weiberfastnacht;
use examplan_calendar_environment::time_environment::format_with_weekday;

pub fn execute(year: i32) -> Result<()> {
    println!("{}", format!("Ostern und Karneval {}", year).bold());
    println!("Weiberfastnacht  {}", format_with_weekday(weiberfastnacht(year)?));
    println!("Rosenmontag      {}", format_with_weekday(rosenmontag(year)?));
    println!("Ostersonntag     {}", format_with_weekday(easter_sunday(year)?));
    println!("Osterwoche       {}", easter_week(year)?.to_string().bright_yellow());
    Ok(())
}
