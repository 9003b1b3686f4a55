//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod bill;
pub mod budget;
pub mod category;
pub mod doctor;
pub mod export;
pub mod gold;
pub mod liability;
pub mod report;
pub mod savings;
pub mod settings;
pub mod transaction;
pub mod transfer;
pub mod wallet;

pub use backup::{handle_backup_command, BackupCommands};
pub use bill::{handle_bill_command, BillCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use doctor::handle_doctor_command;
pub use export::{handle_export_command, ExportCommands};
pub use gold::{handle_gold_command, GoldCommands};
pub use liability::{handle_debt_command, DebtCommands};
pub use report::{handle_report_command, ReportCommands};
pub use savings::{handle_savings_command, SavingsCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use transfer::handle_transfer_command;
pub use wallet::{handle_wallet_command, WalletCommands};

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Weight};

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(s: &str) -> FintrackResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        FintrackError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn parse_date_or_today(s: Option<&str>) -> FintrackResult<NaiveDate> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse a money argument with a friendly error
pub(crate) fn parse_money(s: &str) -> FintrackResult<Money> {
    Money::parse(s).map_err(|e| {
        FintrackError::Validation(format!(
            "Invalid amount '{}'. Use a format like '10.50'. {}",
            s, e
        ))
    })
}

/// Parse a gram weight argument with a friendly error
pub(crate) fn parse_weight(s: &str) -> FintrackResult<Weight> {
    Weight::parse(s).map_err(|e| {
        FintrackError::Validation(format!(
            "Invalid weight '{}'. Use grams like '12.5'. {}",
            s, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-01-15").is_ok());
        assert!(parse_date("15/01/2025").is_err());
    }

    #[test]
    fn test_parse_date_or_today_defaults() {
        let today = chrono::Local::now().date_naive();
        assert_eq!(parse_date_or_today(None).unwrap(), today);
    }

    #[test]
    fn test_parse_money_error_mentions_input() {
        let err = parse_money("abc").unwrap_err();
        assert!(err.to_string().contains("abc"));
    }
}
