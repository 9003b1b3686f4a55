//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_table, TransactionRow};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Transaction, TransactionKind};
use crate::services::{TransactionFilter, TransactionService, WalletService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// Kind: income or expense
        kind: String,
        /// Wallet name or ID
        wallet: String,
        /// Amount (e.g., "10.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List transactions
    List {
        /// Filter by wallet
        #[arg(short, long)]
        wallet: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by kind (income, expense, transfer)
        #[arg(short, long)]
        kind: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FintrackResult<()> {
    let service = TransactionService::new(storage);
    let wallets = WalletService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        TransactionCommands::Add {
            kind,
            wallet,
            amount,
            category,
            date,
            notes,
        } => {
            let kind = TransactionKind::parse(&kind).ok_or_else(|| {
                FintrackError::Validation(format!(
                    "Invalid kind: '{}'. Use income or expense",
                    kind
                ))
            })?;

            let wallet = wallets.require_active(&wallet)?;
            let amount = super::parse_money(&amount)?;
            let date = super::parse_date_or_today(date.as_deref())?;
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

            let txn = service.record(kind, wallet.id, amount, date, category_id, notes)?;

            let wallet = wallets.require(&wallet.name)?;
            println!(
                "Recorded {} of {} against '{}'",
                txn.kind,
                txn.amount.format_with_symbol(symbol),
                wallet.name
            );
            println!(
                "  New balance: {}",
                wallet.balance.format_with_symbol(symbol)
            );
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            wallet,
            category,
            kind,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(wallet) = wallet {
                filter = filter.wallet(wallets.require(&wallet)?.id);
            }
            if let Some(category) = category {
                let category = storage
                    .categories
                    .get_by_name(&category)?
                    .ok_or_else(|| FintrackError::category_not_found(&category))?;
                filter = filter.category(category.id);
            }
            if let Some(kind) = kind {
                let kind = TransactionKind::parse(&kind).ok_or_else(|| {
                    FintrackError::Validation(format!("Invalid kind: '{}'", kind))
                })?;
                filter = filter.kind(kind);
            }

            let transactions = service.list(filter)?;
            let rows = build_rows(storage, &transactions, symbol)?;
            print!("{}", format_transaction_table(rows));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FintrackError::transaction_not_found(&id))?;

            let category_name = match txn.category_id {
                Some(id) => storage.categories.get(id)?.map(|c| c.name),
                None => None,
            };
            print!(
                "{}",
                format_transaction_details(&txn, category_name.as_deref())
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            date,
            category,
            notes,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FintrackError::transaction_not_found(&id))?;

            let amount = amount.as_deref().map(super::parse_money).transpose()?;
            let date = date.as_deref().map(super::parse_date).transpose()?;
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

            let updated = service.update(txn.id, amount, date, category_id, notes)?;
            println!("Updated transaction {}", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FintrackError::transaction_not_found(&id))?;

            service.delete(txn.id)?;
            println!("Deleted transaction {} (balance effect reversed)", txn.id);
        }
    }

    Ok(())
}

/// Resolve wallet and category names for display rows
fn build_rows(
    storage: &Storage,
    transactions: &[Transaction],
    symbol: &str,
) -> FintrackResult<Vec<TransactionRow>> {
    let mut rows = Vec::with_capacity(transactions.len());

    for txn in transactions {
        let wallet_name = match storage.wallets.get(txn.wallet_id)? {
            Some(w) => w.name,
            None => txn.wallet_id.to_string(),
        };

        let transfer_wallet_name = match txn.transfer_wallet_id {
            Some(id) => Some(match storage.wallets.get(id)? {
                Some(w) => w.name,
                None => id.to_string(),
            }),
            None => None,
        };

        let category_name = match txn.category_id {
            Some(id) => storage.categories.get(id)?.map(|c| c.name),
            None => None,
        };

        rows.push(TransactionRow::new(
            txn,
            wallet_name,
            transfer_wallet_name,
            category_name,
            symbol,
        ));
    }

    Ok(rows)
}
