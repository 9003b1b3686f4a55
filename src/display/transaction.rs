//! Transaction display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Transaction, TransactionKind};

/// A resolved register row. Callers look up wallet and category names so
/// this module stays free of storage.
#[derive(Tabled)]
pub struct TransactionRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Wallet")]
    pub wallet: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Notes")]
    pub notes: String,
}

impl TransactionRow {
    /// Build a row from a transaction and its resolved names
    pub fn new(
        txn: &Transaction,
        wallet_name: String,
        transfer_wallet_name: Option<String>,
        category_name: Option<String>,
        symbol: &str,
    ) -> Self {
        let kind = match txn.kind {
            TransactionKind::Income => "in".to_string(),
            TransactionKind::Expense => "out".to_string(),
            TransactionKind::Transfer => "xfer".to_string(),
        };

        let wallet = match transfer_wallet_name {
            Some(to) => format!("{} → {}", wallet_name, to),
            None => wallet_name,
        };

        Self {
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind,
            amount: txn.amount.format_with_symbol(symbol),
            wallet,
            category: category_name.unwrap_or_default(),
            notes: super::truncate(&txn.notes, 30),
        }
    }
}

/// Format resolved rows as a register table
pub fn format_transaction_table(rows: Vec<TransactionRow>) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format one transaction in detail
pub fn format_transaction_details(txn: &Transaction, category_name: Option<&str>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Amount:      {}\n", txn.amount));

    match category_name {
        Some(name) => output.push_str(&format!("Category:    {}\n", name)),
        None if !txn.is_transfer() => output.push_str("Category:    (uncategorized)\n"),
        None => {}
    }

    if !txn.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", txn.notes));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, WalletId};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_empty_table() {
        assert!(format_transaction_table(Vec::new()).contains("No transactions"));
    }

    #[test]
    fn test_transfer_row_shows_both_wallets() {
        let txn = Transaction::transfer(WalletId::new(), WalletId::new(), date(), Money::from_cents(100));
        let row = TransactionRow::new(&txn, "Bank".into(), Some("Cash".into()), None, "$");
        assert_eq!(row.wallet, "Bank → Cash");
        assert_eq!(row.kind, "xfer");
    }

    #[test]
    fn test_details() {
        let txn = Transaction::expense(WalletId::new(), date(), Money::from_cents(1_050))
            .with_notes("groceries run");
        let out = format_transaction_details(&txn, Some("Groceries"));
        assert!(out.contains("$10.50"));
        assert!(out.contains("Groceries"));
        assert!(out.contains("groceries run"));
    }
}
