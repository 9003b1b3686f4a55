//! Path management for fintrack
//!
//! Provides platform-appropriate path resolution for configuration, data,
//! and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. Platform config directory via `directories` (e.g. `~/.config/fintrack`
//!    on Linux, `%APPDATA%\fintrack` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FintrackError;

/// Manages all paths used by fintrack
#[derive(Debug, Clone)]
pub struct FintrackPaths {
    /// Base directory for all fintrack data
    base_dir: PathBuf,
}

impl FintrackPaths {
    /// Create a new FintrackPaths instance
    ///
    /// Path resolution:
    /// 1. `FINTRACK_DATA_DIR` env var (explicit override)
    /// 2. Platform config directory from `directories`
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FintrackError> {
        let base_dir = if let Ok(custom) = std::env::var("FINTRACK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "fintrack").ok_or_else(|| {
                FintrackError::Config("Could not determine a home directory".into())
            })?;
            dirs.config_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create FintrackPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config directory (same as base for simplicity)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to wallets.json
    pub fn wallets_file(&self) -> PathBuf {
        self.data_dir().join("wallets.json")
    }

    /// Get the path to categories.json
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to budgets.json
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Get the path to gold_wallets.json
    pub fn gold_wallets_file(&self) -> PathBuf {
        self.data_dir().join("gold_wallets.json")
    }

    /// Get the path to gold_transactions.json
    pub fn gold_transactions_file(&self) -> PathBuf {
        self.data_dir().join("gold_transactions.json")
    }

    /// Get the path to the cached gold spot quote
    pub fn gold_price_file(&self) -> PathBuf {
        self.data_dir().join("gold_price.json")
    }

    /// Get the path to savings_goals.json
    pub fn savings_goals_file(&self) -> PathBuf {
        self.data_dir().join("savings_goals.json")
    }

    /// Get the path to bills.json
    pub fn bills_file(&self) -> PathBuf {
        self.data_dir().join("bills.json")
    }

    /// Get the path to liabilities.json (debts and their payments)
    pub fn liabilities_file(&self) -> PathBuf {
        self.data_dir().join("liabilities.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory
    /// - Data directory
    /// - Backup directory
    pub fn ensure_directories(&self) -> Result<(), FintrackError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FintrackError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FintrackError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| FintrackError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if fintrack has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
