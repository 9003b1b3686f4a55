//! Wallet repository for JSON storage
//!
//! Manages loading and saving wallets to wallets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{Wallet, WalletId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable wallet data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct WalletData {
    wallets: Vec<Wallet>,
}

/// Repository for wallet persistence
pub struct WalletRepository {
    path: PathBuf,
    data: RwLock<HashMap<WalletId, Wallet>>,
}

impl WalletRepository {
    /// Create a new wallet repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load wallets from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: WalletData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for wallet in file_data.wallets {
            data.insert(wallet.id, wallet);
        }

        Ok(())
    }

    /// Save wallets to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = WalletData {
            wallets: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a wallet by ID
    pub fn get(&self, id: WalletId) -> Result<Option<Wallet>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all wallets, ordered for display
    pub fn get_all(&self) -> Result<Vec<Wallet>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut wallets: Vec<_> = data.values().cloned().collect();
        wallets.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(wallets)
    }

    /// Get all active (non-archived) wallets
    pub fn get_active(&self) -> Result<Vec<Wallet>, FintrackError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|w| !w.archived).collect())
    }

    /// Get a wallet by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Wallet>, FintrackError> {
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

    /// Insert or update a wallet
    pub fn upsert(&self, wallet: Wallet) -> Result<(), FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(wallet.id, wallet);
        Ok(())
    }

    /// Delete a wallet
    pub fn delete(&self, id: WalletId) -> Result<bool, FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if a wallet name is already taken
    pub fn name_exists(&self, name: &str, exclude_id: Option<WalletId>) -> Result<bool, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .any(|w| w.name.to_lowercase() == name_lower && Some(w.id) != exclude_id))
    }

    /// Count wallets
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
