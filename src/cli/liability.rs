//! Liability (debt) CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_liability_list, format_payment_history};
use crate::error::FintrackResult;
use crate::services::{LiabilityService, WalletService};
use crate::storage::Storage;

/// Debt subcommands
#[derive(Subcommand)]
pub enum DebtCommands {
    /// Track a new debt
    Add {
        /// Debt name
        name: String,
        /// Amount owed
        amount: String,
        /// Who the debt is owed to
        #[arg(short, long, default_value = "")]
        creditor: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List debts
    List {
        /// Show settled debts too
        #[arg(short, long)]
        all: bool,
    },
    /// Show a debt with its payment history
    Show {
        /// Debt name or ID
        debt: String,
    },
    /// Pay down a debt from a wallet
    Pay {
        /// Debt name or ID
        debt: String,
        /// Amount to pay (capped at the outstanding balance)
        amount: String,
        /// Wallet to pay from
        #[arg(short, long)]
        wallet: String,
        /// Payment date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Remove a debt and its payment history
    Remove {
        /// Debt name or ID
        debt: String,
    },
}

/// Handle a debt command
pub fn handle_debt_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DebtCommands,
) -> FintrackResult<()> {
    let service = LiabilityService::new(storage);
    let wallets = WalletService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        DebtCommands::Add {
            name,
            amount,
            creditor,
            due,
            notes,
        } => {
            let amount = super::parse_money(&amount)?;
            let due = due.as_deref().map(super::parse_date).transpose()?;

            let debt = service.add(&name, &creditor, amount, due, notes)?;
            println!("Tracking debt: {}", debt);
        }

        DebtCommands::List { all } => {
            let debts = service.list(all)?;
            print!("{}", format_liability_list(&debts, symbol));
        }

        DebtCommands::Show { debt } => {
            let found = service.require(&debt)?;
            let payments = service.payments(found.id)?;
            print!("{}", format_payment_history(&found, &payments, symbol));
        }

        DebtCommands::Pay {
            debt,
            amount,
            wallet,
            date,
            notes,
        } => {
            let found = service.require(&debt)?;
            let wallet = wallets.require_active(&wallet)?;
            let amount = super::parse_money(&amount)?;
            let date = super::parse_date_or_today(date.as_deref())?;

            let (debt, payment) = service.pay(found.id, wallet.id, amount, date, notes)?;
            println!(
                "Paid {} toward '{}'",
                payment.amount.format_with_symbol(symbol),
                debt.name
            );
            if debt.is_settled() {
                println!("  Debt settled 🎉");
            } else {
                println!(
                    "  Outstanding: {}",
                    debt.balance.format_with_symbol(symbol)
                );
            }
        }

        DebtCommands::Remove { debt } => {
            let found = service.require(&debt)?;
            service.remove(found.id)?;
            println!("Removed debt '{}'", found.name);
        }
    }

    Ok(())
}
