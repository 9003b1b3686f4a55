//! Backup restoration for fintrack
//!
//! Restoring overwrites each store with the archive's copy. Stores absent
//! from the archive (null) are left untouched.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::paths::FintrackPaths;
use crate::error::{FintrackError, FintrackResult};

use super::manager::BackupArchive;

/// Handles restoring from backups
pub struct RestoreManager {
    paths: FintrackPaths,
}

/// What a restore touched
#[derive(Debug, Clone, Default)]
pub struct RestoreResult {
    /// Store names that were overwritten
    pub restored: Vec<&'static str>,
    /// Schema version of the archive
    pub schema_version: u32,
    /// When the archive was created
    pub backup_date: Option<DateTime<Utc>>,
}

/// Result of validating a backup without restoring
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: FintrackPaths) -> Self {
        Self { paths }
    }

    /// Restore data from a backup file
    ///
    /// This will overwrite all current data with the backup contents.
    /// It's recommended to create a backup before restoring.
    pub fn restore_from_file(&self, backup_path: &Path) -> FintrackResult<RestoreResult> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| FintrackError::Io(format!("Failed to read backup file: {}", e)))?;

        let archive: BackupArchive = serde_json::from_str(&contents)
            .map_err(|e| FintrackError::Json(format!("Failed to parse backup file: {}", e)))?;

        self.restore_from_archive(&archive)
    }

    /// Restore data from a parsed backup archive
    pub fn restore_from_archive(&self, archive: &BackupArchive) -> FintrackResult<RestoreResult> {
        self.paths.ensure_directories()?;

        let mut result = RestoreResult {
            schema_version: archive.schema_version,
            backup_date: Some(archive.created_at),
            ..Default::default()
        };

        let stores: [(&'static str, &serde_json::Value, PathBuf); 11] = [
            ("wallets", &archive.wallets, self.paths.wallets_file()),
            ("categories", &archive.categories, self.paths.categories_file()),
            (
                "transactions",
                &archive.transactions,
                self.paths.transactions_file(),
            ),
            ("budgets", &archive.budgets, self.paths.budgets_file()),
            (
                "gold_wallets",
                &archive.gold_wallets,
                self.paths.gold_wallets_file(),
            ),
            (
                "gold_transactions",
                &archive.gold_transactions,
                self.paths.gold_transactions_file(),
            ),
            ("gold_price", &archive.gold_price, self.paths.gold_price_file()),
            (
                "savings_goals",
                &archive.savings_goals,
                self.paths.savings_goals_file(),
            ),
            ("bills", &archive.bills, self.paths.bills_file()),
            (
                "liabilities",
                &archive.liabilities,
                self.paths.liabilities_file(),
            ),
            ("settings", &archive.settings, self.paths.settings_file()),
        ];

        for (name, value, path) in stores {
            if value.is_null() {
                continue;
            }

            let json = serde_json::to_string_pretty(value)
                .map_err(|e| FintrackError::Json(format!("Failed to serialize {}: {}", name, e)))?;
            fs::write(&path, json)
                .map_err(|e| FintrackError::Io(format!("Failed to restore {}: {}", name, e)))?;

            result.restored.push(name);
        }

        Ok(result)
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> FintrackResult<ValidationResult> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| FintrackError::Io(format!("Failed to read backup file: {}", e)))?;

        let archive: BackupArchive = serde_json::from_str(&contents)
            .map_err(|e| FintrackError::Json(format!("Failed to parse backup file: {}", e)))?;

        Ok(ValidationResult {
            is_valid: true,
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::manager::BackupManager;
    use crate::config::settings::BackupRetention;
    use tempfile::TempDir;

    #[test]
    fn test_backup_then_restore_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        fs::write(paths.wallets_file(), r#"{"wallets": []}"#).unwrap();

        let manager = BackupManager::new(paths.clone(), BackupRetention::default());
        let backup_path = manager.create_backup().unwrap();

        // Wipe the store, then restore
        fs::remove_file(paths.wallets_file()).unwrap();

        let restore = RestoreManager::new(paths.clone());
        let result = restore.restore_from_file(&backup_path).unwrap();

        assert!(result.restored.contains(&"wallets"));
        assert!(!result.restored.contains(&"transactions"));
        assert!(paths.wallets_file().exists());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let bad = temp_dir.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();

        let restore = RestoreManager::new(paths);
        assert!(restore.validate_backup(&bad).is_err());
    }

    #[test]
    fn test_validate_good_backup() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let manager = BackupManager::new(paths.clone(), BackupRetention::default());
        let backup_path = manager.create_backup().unwrap();

        let restore = RestoreManager::new(paths);
        let result = restore.validate_backup(&backup_path).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.schema_version, 1);
    }
}
