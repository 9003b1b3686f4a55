//! Gold repositories for JSON storage
//!
//! Three stores live here: gold wallets, the gold ledger, and the cached
//! spot quote used for valuation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{GoldPriceQuote, GoldTransaction, GoldTransactionId, GoldWallet, GoldWalletId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable gold wallet data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoldWalletData {
    gold_wallets: Vec<GoldWallet>,
}

/// Repository for gold wallet persistence
pub struct GoldWalletRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoldWalletId, GoldWallet>>,
}

impl GoldWalletRepository {
    /// Create a new gold wallet repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load gold wallets from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: GoldWalletData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for wallet in file_data.gold_wallets {
            data.insert(wallet.id, wallet);
        }

        Ok(())
    }

    /// Save gold wallets to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = GoldWalletData {
            gold_wallets: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a gold wallet by ID
    pub fn get(&self, id: GoldWalletId) -> Result<Option<GoldWallet>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all gold wallets, ordered by name
    pub fn get_all(&self) -> Result<Vec<GoldWallet>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut wallets: Vec<_> = data.values().cloned().collect();
        wallets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(wallets)
    }

    /// Get all active (non-archived) gold wallets
    pub fn get_active(&self) -> Result<Vec<GoldWallet>, FintrackError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|w| !w.archived).collect())
    }

    /// Get a gold wallet by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<GoldWallet>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|w| w.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a gold wallet
    pub fn upsert(&self, wallet: GoldWallet) -> Result<(), FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(wallet.id, wallet);
        Ok(())
    }

    /// Count gold wallets
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

/// Serializable gold ledger data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoldTransactionData {
    gold_transactions: Vec<GoldTransaction>,
}

/// Repository for the gold ledger
pub struct GoldTransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoldTransactionId, GoldTransaction>>,
}

impl GoldTransactionRepository {
    /// Create a new gold ledger repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load the gold ledger from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: GoldTransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for txn in file_data.gold_transactions {
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save the gold ledger to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = GoldTransactionData {
            gold_transactions: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get all entries, newest first
    pub fn get_all(&self) -> Result<Vec<GoldTransaction>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut txns: Vec<_> = data.values().cloned().collect();
        txns.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(txns)
    }

    /// Get all entries touching a gold wallet
    pub fn get_by_wallet(&self, id: GoldWalletId) -> Result<Vec<GoldTransaction>, FintrackError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.gold_wallet_id == id || t.counter_gold_wallet_id == Some(id))
            .collect())
    }

    /// Append an entry
    pub fn upsert(&self, txn: GoldTransaction) -> Result<(), FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

/// Store for the cached gold spot quote
pub struct GoldPriceStore {
    path: PathBuf,
}

impl GoldPriceStore {
    /// Create a new price store
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the cached quote, if any
    pub fn get(&self) -> Result<Option<GoldPriceQuote>, FintrackError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let quote: GoldPriceQuote = super::file_io::read_json_required(&self.path)?;
        Ok(Some(quote))
    }

    /// Replace the cached quote
    pub fn set(&self, quote: &GoldPriceQuote) -> Result<(), FintrackError> {
        write_json_atomic(&self.path, quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoldPurity, GoldTransactionKind, Money, Weight};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_gold_wallet_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gold_wallets.json");
        let repo = GoldWalletRepository::new(path.clone());
        repo.load().unwrap();

        let mut vault = GoldWallet::new("Vault", GoldPurity::K24);
        vault.add(Weight::from_grams(5), Money::from_cents(325_000));
        let id = vault.id;
        repo.upsert(vault).unwrap();
        repo.save().unwrap();

        let repo2 = GoldWalletRepository::new(path);
        repo2.load().unwrap();
        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.weight.grams(), 5);
        assert_eq!(loaded.cost_basis.cents(), 325_000);
    }

    #[test]
    fn test_gold_ledger_by_wallet() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoldTransactionRepository::new(temp_dir.path().join("gold_transactions.json"));
        repo.load().unwrap();

        let vault = GoldWalletId::new();
        let other = GoldWalletId::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        repo.upsert(GoldTransaction::new(
            GoldTransactionKind::Buy,
            vault,
            Weight::from_grams(1),
            date,
        ))
        .unwrap();

        let mut xfer =
            GoldTransaction::new(GoldTransactionKind::Transfer, other, Weight::from_grams(1), date);
        xfer.counter_gold_wallet_id = Some(vault);
        repo.upsert(xfer).unwrap();

        assert_eq!(repo.get_by_wallet(vault).unwrap().len(), 2);
        assert_eq!(repo.get_by_wallet(other).unwrap().len(), 1);
    }

    #[test]
    fn test_price_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = GoldPriceStore::new(temp_dir.path().join("gold_price.json"));

        assert!(store.get().unwrap().is_none());

        let quote = GoldPriceQuote::manual(Money::from_cents(6500), "USD");
        store.set(&quote).unwrap();

        let loaded = store.get().unwrap().unwrap();
        assert_eq!(loaded.price_per_gram.cents(), 6500);
        assert_eq!(loaded.source, "manual");
    }
}
