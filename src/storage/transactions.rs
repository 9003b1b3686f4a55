//! Transaction repository for JSON storage
//!
//! Manages loading and saving the ledger to transactions.json and provides
//! the filtered views the services and reports are built on.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::FintrackError;
use crate::models::{CategoryId, Transaction, TransactionId, WalletId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = TransactionData {
            transactions: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Get all transactions touching a wallet (as source or transfer destination)
    pub fn get_by_wallet(&self, wallet_id: WalletId) -> Result<Vec<Transaction>, FintrackError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.wallet_id == wallet_id || t.transfer_wallet_id == Some(wallet_id))
            .collect())
    }

    /// Get all transactions in a category
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Transaction>, FintrackError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.category_id == Some(category_id))
            .collect())
    }

    /// Get all transactions dated within an inclusive range
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, FintrackError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_get_all_sorted_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let wallet = WalletId::new();
        repo.upsert(Transaction::expense(wallet, d(2025, 1, 1), Money::from_cents(100)))
            .unwrap();
        repo.upsert(Transaction::expense(wallet, d(2025, 1, 20), Money::from_cents(200)))
            .unwrap();
        repo.upsert(Transaction::expense(wallet, d(2025, 1, 10), Money::from_cents(300)))
            .unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].date, d(2025, 1, 20));
        assert_eq!(all[2].date, d(2025, 1, 1));
    }

    #[test]
    fn test_get_by_wallet_includes_transfer_destination() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let from = WalletId::new();
        let to = WalletId::new();
        repo.upsert(Transaction::transfer(from, to, d(2025, 1, 5), Money::from_cents(100)))
            .unwrap();
        repo.upsert(Transaction::expense(from, d(2025, 1, 6), Money::from_cents(50)))
            .unwrap();

        assert_eq!(repo.get_by_wallet(from).unwrap().len(), 2);
        assert_eq!(repo.get_by_wallet(to).unwrap().len(), 1);
    }

    #[test]
    fn test_get_by_date_range() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let wallet = WalletId::new();
        for day in [1, 10, 20] {
            repo.upsert(Transaction::expense(wallet, d(2025, 1, day), Money::from_cents(100)))
                .unwrap();
        }

        let in_range = repo.get_by_date_range(d(2025, 1, 5), d(2025, 1, 15)).unwrap();
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].date, d(2025, 1, 10));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let txn = Transaction::income(WalletId::new(), d(2025, 1, 1), Money::from_cents(100));
        let id = txn.id;
        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();
        assert!(repo2.get(id).unwrap().is_some());
    }
}
