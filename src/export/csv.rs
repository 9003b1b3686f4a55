//! CSV export functionality
//!
//! Exports the cash ledger and the gold ledger as CSV with resolved
//! wallet and category names.

use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::storage::Storage;

/// Export all transactions as CSV, newest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> FintrackResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["date", "kind", "amount", "wallet", "to_wallet", "category", "notes"])
        .map_err(|e| FintrackError::Export(format!("Failed to write CSV header: {}", e)))?;

    let transactions = storage.transactions.get_all()?;
    let count = transactions.len();

    for txn in transactions {
        let wallet = match storage.wallets.get(txn.wallet_id)? {
            Some(w) => w.name,
            None => txn.wallet_id.to_string(),
        };

        let to_wallet = match txn.transfer_wallet_id {
            Some(id) => match storage.wallets.get(id)? {
                Some(w) => w.name,
                None => id.to_string(),
            },
            None => String::new(),
        };

        let category = match txn.category_id {
            Some(id) => match storage.categories.get(id)? {
                Some(c) => c.name,
                None => id.to_string(),
            },
            None => String::new(),
        };

        csv_writer
            .write_record([
                txn.date.to_string(),
                txn.kind.to_string().to_lowercase(),
                format!("{}.{:02}", txn.amount.units(), txn.amount.cents_part()),
                wallet,
                to_wallet,
                category,
                txn.notes,
            ])
            .map_err(|e| FintrackError::Export(format!("Failed to write CSV row: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FintrackError::Export(format!("Failed to flush CSV: {}", e)))?;

    Ok(count)
}

/// Export the gold ledger as CSV, newest first
pub fn export_gold_csv<W: Write>(storage: &Storage, writer: W) -> FintrackResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "date",
            "kind",
            "gold_wallet",
            "to_gold_wallet",
            "weight_g",
            "price_per_gram",
            "total",
            "notes",
        ])
        .map_err(|e| FintrackError::Export(format!("Failed to write CSV header: {}", e)))?;

    let entries = storage.gold_transactions.get_all()?;
    let count = entries.len();

    for entry in entries {
        let wallet = match storage.gold_wallets.get(entry.gold_wallet_id)? {
            Some(w) => w.name,
            None => entry.gold_wallet_id.to_string(),
        };

        let to_wallet = match entry.counter_gold_wallet_id {
            Some(id) => match storage.gold_wallets.get(id)? {
                Some(w) => w.name,
                None => id.to_string(),
            },
            None => String::new(),
        };

        csv_writer
            .write_record([
                entry.date.to_string(),
                entry.kind.to_string().to_lowercase(),
                wallet,
                to_wallet,
                format!("{}.{:03}", entry.weight.grams(), entry.weight.milligrams_part()),
                format!(
                    "{}.{:02}",
                    entry.price_per_gram.units(),
                    entry.price_per_gram.cents_part()
                ),
                format!("{}.{:02}", entry.total.units(), entry.total.cents_part()),
                entry.notes,
            ])
            .map_err(|e| FintrackError::Export(format!("Failed to write CSV row: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FintrackError::Export(format!("Failed to flush CSV: {}", e)))?;

    Ok(count)
}
