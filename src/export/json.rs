//! JSON export functionality
//!
//! Exports the complete tracker state to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    BillReminder, Budget, Category, GoldTransaction, GoldWallet, Liability, LiabilityPayment,
    SavingsGoal, Transaction, Wallet,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full tracker export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub gold_wallets: Vec<GoldWallet>,
    pub gold_transactions: Vec<GoldTransaction>,
    pub savings_goals: Vec<SavingsGoal>,
    pub bills: Vec<BillReminder>,
    pub liabilities: Vec<Liability>,
    pub liability_payments: Vec<LiabilityPayment>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub wallet_count: usize,
    pub transaction_count: usize,
    pub gold_transaction_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a full export from storage
    pub fn from_storage(storage: &Storage) -> FintrackResult<Self> {
        let wallets = storage.wallets.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let gold_transactions = storage.gold_transactions.get_all()?;

        // get_all returns newest first
        let latest_transaction = transactions.first().map(|t| t.date.to_string());
        let earliest_transaction = transactions.last().map(|t| t.date.to_string());

        let metadata = ExportMetadata {
            wallet_count: wallets.len(),
            transaction_count: transactions.len(),
            gold_transaction_count: gold_transactions.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            wallets,
            categories: storage.categories.get_all()?,
            transactions,
            budgets: storage.budgets.get_all()?,
            gold_wallets: storage.gold_wallets.get_all()?,
            gold_transactions,
            savings_goals: storage.savings_goals.get_all()?,
            bills: storage.bills.get_all()?,
            liabilities: storage.liabilities.get_all()?,
            liability_payments: storage.liabilities.get_all_payments()?,
            metadata,
        })
    }

    /// Write the export as pretty JSON
    pub fn write_to<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        serde_json::to_writer_pretty(&mut *writer, self)
            .map_err(|e| FintrackError::Export(format!("Failed to serialize export: {}", e)))?;
        writer
            .write_all(b"\n")
            .map_err(|e| FintrackError::Export(format!("Failed to write export: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_export_counts_and_range() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let wallet = Wallet::with_balance("Cash", Money::from_cents(1_000));
        let id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();
        for day in [3, 15] {
            storage
                .transactions
                .upsert(Transaction::expense(
                    id,
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    Money::from_cents(100),
                ))
                .unwrap();
        }

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.metadata.wallet_count, 1);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-03"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2025-01-15"));

        let mut buf = Vec::new();
        export.write_to(&mut buf).unwrap();
        let parsed: FullExport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
    }
}
