//! Report CLI commands

use chrono::Datelike;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_calendar, format_dashboard, format_spending};
use crate::error::FintrackResult;
use crate::models::Period;
use crate::reports::{CalendarReport, DashboardReport, SpendingReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Overview: cash, gold, debts, goals, recent activity
    Dashboard,
    /// Spending by category
    Spending {
        /// Range start (YYYY-MM-DD); current month if omitted
        #[arg(short, long)]
        from: Option<String>,
        /// Range end (YYYY-MM-DD); current month if omitted
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Month summary with per-day totals and due bills
    Calendar {
        /// Month as YYYY-MM; current month if omitted
        month: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FintrackResult<()> {
    let symbol = &settings.currency_symbol;
    let today = chrono::Local::now().date_naive();

    match cmd {
        ReportCommands::Dashboard => {
            let report = DashboardReport::generate(storage, today)?;
            print!("{}", format_dashboard(&report, symbol));
        }

        ReportCommands::Spending { from, to } => {
            let (default_start, default_end) = Period::Monthly.window_containing(today);
            let start = match from {
                Some(s) => super::parse_date(&s)?,
                None => default_start,
            };
            let end = match to {
                Some(s) => super::parse_date(&s)?,
                None => default_end,
            };

            let report = SpendingReport::generate(storage, start, end)?;
            print!("{}", format_spending(&report, symbol));
        }

        ReportCommands::Calendar { month } => {
            let (year, month) = match month {
                Some(s) => parse_month(&s)?,
                None => (today.year(), today.month()),
            };

            let report = CalendarReport::generate(storage, year, month)?;
            print!("{}", format_calendar(&report, symbol));
        }
    }

    Ok(())
}

/// Parse a YYYY-MM month argument
fn parse_month(s: &str) -> FintrackResult<(i32, u32)> {
    let parsed = chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| {
            crate::error::FintrackError::Validation(format!(
                "Invalid month '{}', expected YYYY-MM",
                s
            ))
        })?;
    Ok((parsed.year(), parsed.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert!(parse_month("2025").is_err());
        assert!(parse_month("2025-13").is_err());
    }
}
