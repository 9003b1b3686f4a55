//! Storage layer for fintrack
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each entity family has its own repository over its own file,
//! mirroring the per-key layout of the original data.

pub mod bills;
pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod gold;
pub mod init;
pub mod liabilities;
pub mod savings;
pub mod transactions;
pub mod wallets;

pub use bills::BillRepository;
pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use gold::{GoldPriceStore, GoldTransactionRepository, GoldWalletRepository};
pub use init::initialize_storage;
pub use liabilities::LiabilityRepository;
pub use savings::SavingsGoalRepository;
pub use transactions::TransactionRepository;
pub use wallets::WalletRepository;

use crate::config::paths::FintrackPaths;
use crate::error::FintrackError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FintrackPaths,
    pub wallets: WalletRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub gold_wallets: GoldWalletRepository,
    pub gold_transactions: GoldTransactionRepository,
    pub gold_price: GoldPriceStore,
    pub savings_goals: SavingsGoalRepository,
    pub bills: BillRepository,
    pub liabilities: LiabilityRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FintrackPaths) -> Result<Self, FintrackError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            wallets: WalletRepository::new(paths.wallets_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            gold_wallets: GoldWalletRepository::new(paths.gold_wallets_file()),
            gold_transactions: GoldTransactionRepository::new(paths.gold_transactions_file()),
            gold_price: GoldPriceStore::new(paths.gold_price_file()),
            savings_goals: SavingsGoalRepository::new(paths.savings_goals_file()),
            bills: BillRepository::new(paths.bills_file()),
            liabilities: LiabilityRepository::new(paths.liabilities_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FintrackError> {
        self.wallets.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        self.budgets.load()?;
        self.gold_wallets.load()?;
        self.gold_transactions.load()?;
        self.savings_goals.load()?;
        self.bills.load()?;
        self.liabilities.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FintrackError> {
        self.wallets.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        self.budgets.save()?;
        self.gold_wallets.save()?;
        self.gold_transactions.save()?;
        self.savings_goals.save()?;
        self.bills.save()?;
        self.liabilities.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_all_on_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        storage.load_all().unwrap();
        assert_eq!(storage.wallets.count().unwrap(), 0);
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }
}
