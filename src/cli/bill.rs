//! Bill CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_bill_list;
use crate::error::{FintrackError, FintrackResult};
use crate::models::Period;
use crate::services::{BillService, WalletService};
use crate::storage::Storage;

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Add a bill
    Add {
        /// Bill name
        name: String,
        /// Amount due each cycle
        amount: String,
        /// Due date (YYYY-MM-DD)
        due: String,
        /// Recurrence (weekly, monthly, yearly); one-shot if omitted
        #[arg(short, long)]
        recurrence: Option<String>,
        /// Default wallet to pay from
        #[arg(short, long)]
        wallet: Option<String>,
        /// Category applied to payments
        #[arg(short, long)]
        category: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List bills
    List,
    /// Show unpaid bills due within a window
    Due {
        /// Days ahead to look
        #[arg(short, long, default_value = "14")]
        days: i64,
    },
    /// Pay one cycle of a bill
    Pay {
        /// Bill name or ID
        bill: String,
        /// Wallet to pay from (the bill's default if omitted)
        #[arg(short, long)]
        wallet: Option<String>,
        /// Payment date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove a bill
    Remove {
        /// Bill name or ID
        bill: String,
    },
}

/// Handle a bill command
pub fn handle_bill_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BillCommands,
) -> FintrackResult<()> {
    let service = BillService::new(storage);
    let wallets = WalletService::new(storage);
    let symbol = &settings.currency_symbol;
    let today = chrono::Local::now().date_naive();

    match cmd {
        BillCommands::Add {
            name,
            amount,
            due,
            recurrence,
            wallet,
            category,
            notes,
        } => {
            let amount = super::parse_money(&amount)?;
            let due = super::parse_date(&due)?;

            let recurrence = match recurrence {
                Some(r) => Some(Period::parse(&r).ok_or_else(|| {
                    FintrackError::Validation(format!(
                        "Invalid recurrence: '{}'. Valid: weekly, monthly, yearly",
                        r
                    ))
                })?),
                None => None,
            };

            let wallet_id = wallet
                .map(|w| wallets.require(&w).map(|w| w.id))
                .transpose()?;

            let category_id = match category {
                Some(name) => Some(
                    storage
                        .categories
                        .get_by_name(&name)?
                        .ok_or_else(|| FintrackError::category_not_found(&name))?
                        .id,
                ),
                None => None,
            };

            let bill = service.add(&name, amount, due, recurrence, wallet_id, category_id, notes)?;
            println!("Added bill: {}", bill);
        }

        BillCommands::List => {
            let bills = service.list()?;
            print!("{}", format_bill_list(&bills, today, symbol));
        }

        BillCommands::Due { days } => {
            let bills = service.due_within(today, days)?;
            if bills.is_empty() {
                println!("Nothing due in the next {} days.", days);
            } else {
                print!("{}", format_bill_list(&bills, today, symbol));
            }
        }

        BillCommands::Pay { bill, wallet, date } => {
            let found = service.require(&bill)?;
            let wallet_id = wallet
                .map(|w| wallets.require_active(&w).map(|w| w.id))
                .transpose()?;
            let date = super::parse_date_or_today(date.as_deref())?;

            let (bill, txn) = service.pay(found.id, wallet_id, date)?;
            println!(
                "Paid {} for '{}'",
                txn.amount.format_with_symbol(symbol),
                bill.name
            );
            if bill.is_recurring() {
                println!("  Next due: {}", bill.due_date.format("%Y-%m-%d"));
            }
        }

        BillCommands::Remove { bill } => {
            let found = service.require(&bill)?;
            service.remove(found.id)?;
            println!("Removed bill '{}'", found.name);
        }
    }

    Ok(())
}
