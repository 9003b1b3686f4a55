//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_status_table;
use crate::error::{FintrackError, FintrackResult};
use crate::models::Period;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a spending limit for a category
    Set {
        /// Category name
        category: String,
        /// Limit per period (e.g., "500.00")
        amount: String,
        /// Period (weekly, monthly, yearly)
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },
    /// Show budget standing for the current period
    List {
        /// Reference date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove a category's budget
    Remove {
        /// Category name
        category: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FintrackResult<()> {
    let service = BudgetService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
        } => {
            let found = storage
                .categories
                .get_by_name(&category)?
                .ok_or_else(|| FintrackError::category_not_found(&category))?;

            let amount = super::parse_money(&amount)?;
            let period = Period::parse(&period).ok_or_else(|| {
                FintrackError::Validation(format!(
                    "Invalid period: '{}'. Valid periods: weekly, monthly, yearly",
                    period
                ))
            })?;

            let budget = service.set(found.id, amount, period)?;
            println!(
                "Budget for '{}': {} per {}",
                found.name,
                budget.amount.format_with_symbol(symbol),
                budget.period
            );
        }

        BudgetCommands::List { date } => {
            let as_of = super::parse_date_or_today(date.as_deref())?;
            let statuses = service.status_all(as_of)?;
            print!("{}", format_budget_status_table(&statuses, symbol));
        }

        BudgetCommands::Remove { category } => {
            let found = storage
                .categories
                .get_by_name(&category)?
                .ok_or_else(|| FintrackError::category_not_found(&category))?;

            let budget = storage.budgets.get_by_category(found.id)?.ok_or_else(|| {
                FintrackError::Budget(format!("No budget set for '{}'", found.name))
            })?;

            service.remove(budget.id)?;
            println!("Removed budget for '{}'", found.name);
        }
    }

    Ok(())
}
