//! Backup manager for fintrack
//!
//! Handles rolling backups with configurable retention policies. A backup
//! is one dated JSON archive holding every store plus the settings file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::FintrackPaths;
use crate::config::settings::BackupRetention;
use crate::error::{FintrackError, FintrackResult};

/// Current archive schema version
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Backup archive format: every store serialized as raw JSON
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    /// Schema version for migration support
    pub schema_version: u32,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    pub wallets: serde_json::Value,
    pub categories: serde_json::Value,
    pub transactions: serde_json::Value,
    pub budgets: serde_json::Value,
    pub gold_wallets: serde_json::Value,
    pub gold_transactions: serde_json::Value,
    pub gold_price: serde_json::Value,
    pub savings_goals: serde_json::Value,
    pub bills: serde_json::Value,
    pub liabilities: serde_json::Value,
    pub settings: serde_json::Value,
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Paths to data files
    paths: FintrackPaths,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: FintrackPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Create a backup of all data
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> FintrackResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| FintrackError::Io(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!("backup-{}.json", now.format("%Y%m%d-%H%M%S"));
        let backup_path = self.backup_dir.join(&filename);

        let archive = self.create_archive(now)?;

        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| FintrackError::Json(format!("Failed to serialize backup: {}", e)))?;

        fs::write(&backup_path, json)
            .map_err(|e| FintrackError::Io(format!("Failed to write backup file: {}", e)))?;

        Ok(backup_path)
    }

    /// Create a backup archive from current data
    fn create_archive(&self, timestamp: DateTime<Utc>) -> FintrackResult<BackupArchive> {
        Ok(BackupArchive {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at: timestamp,
            wallets: read_json_value(&self.paths.wallets_file())?,
            categories: read_json_value(&self.paths.categories_file())?,
            transactions: read_json_value(&self.paths.transactions_file())?,
            budgets: read_json_value(&self.paths.budgets_file())?,
            gold_wallets: read_json_value(&self.paths.gold_wallets_file())?,
            gold_transactions: read_json_value(&self.paths.gold_transactions_file())?,
            gold_price: read_json_value(&self.paths.gold_price_file())?,
            savings_goals: read_json_value(&self.paths.savings_goals_file())?,
            bills: read_json_value(&self.paths.bills_file())?,
            liabilities: read_json_value(&self.paths.liabilities_file())?,
            settings: read_json_value(&self.paths.settings_file())?,
        })
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> FintrackResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| FintrackError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| FintrackError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete backups beyond the retention policy.
    ///
    /// Keeps the `daily_count` newest backups, plus the newest backup of
    /// each month for `monthly_count` months. Returns the deleted files.
    pub fn prune(&self) -> FintrackResult<Vec<PathBuf>> {
        let backups = self.list_backups()?;

        let mut keep: Vec<&BackupInfo> = backups
            .iter()
            .take(self.retention.daily_count as usize)
            .collect();

        // Newest backup per month, most recent months first
        let mut months_seen: Vec<(i32, u32)> = Vec::new();
        for backup in &backups {
            let month = (backup.created_at.year(), backup.created_at.month());
            if months_seen.contains(&month) {
                continue;
            }
            months_seen.push(month);
            if months_seen.len() > self.retention.monthly_count as usize {
                break;
            }
            if !keep.iter().any(|b| b.filename == backup.filename) {
                keep.push(backup);
            }
        }

        let mut deleted = Vec::new();
        for backup in &backups {
            if keep.iter().any(|b| b.filename == backup.filename) {
                continue;
            }
            fs::remove_file(&backup.path)
                .map_err(|e| FintrackError::Io(format!("Failed to delete backup: {}", e)))?;
            deleted.push(backup.path.clone());
        }

        Ok(deleted)
    }
}

/// Read a data file as raw JSON, null if it doesn't exist
fn read_json_value(path: &Path) -> FintrackResult<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Null);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| FintrackError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| FintrackError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Parse backup info from a backup file path
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();

    let date_part = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let naive = NaiveDateTime::parse_from_str(date_part, "%Y%m%d-%H%M%S").ok()?;
    let created_at = Utc.from_utc_datetime(&naive);

    let metadata = fs::metadata(path).ok()?;

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp_dir: &TempDir) -> BackupManager {
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        BackupManager::new(paths, BackupRetention::default())
    }

    #[test]
    fn test_create_and_list_backup() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let path = manager.create_backup().unwrap();
        assert!(path.exists());

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert!(backups[0].size_bytes > 0);
    }

    #[test]
    fn test_archive_includes_existing_stores() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        std::fs::write(paths.wallets_file(), r#"{"wallets": []}"#).unwrap();

        let manager = BackupManager::new(paths, BackupRetention::default());
        let path = manager.create_backup().unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let archive: BackupArchive = serde_json::from_str(&contents).unwrap();

        assert_eq!(archive.schema_version, BACKUP_SCHEMA_VERSION);
        assert!(!archive.wallets.is_null());
        // Stores that never existed serialize as null
        assert!(archive.transactions.is_null());
    }

    #[test]
    fn test_parse_backup_filename() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup-20250115-093000.json");
        std::fs::write(&path, "{}").unwrap();

        let info = parse_backup_info(&path).unwrap();
        assert_eq!(info.created_at.year(), 2025);
        assert_eq!(info.created_at.month(), 1);

        let bad = temp_dir.path().join("notabackup.json");
        std::fs::write(&bad, "{}").unwrap();
        assert!(parse_backup_info(&bad).is_none());
    }

    #[test]
    fn test_prune_keeps_recent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        // Tight retention: 2 daily, 1 monthly
        let retention = BackupRetention {
            daily_count: 2,
            monthly_count: 1,
        };
        let manager = BackupManager::new(paths.clone(), retention);

        // Hand-write dated backup files across two months
        for name in [
            "backup-20250110-100000.json",
            "backup-20250111-100000.json",
            "backup-20250112-100000.json",
            "backup-20241220-100000.json",
        ] {
            std::fs::write(paths.backup_dir().join(name), "{}").unwrap();
        }

        let deleted = manager.prune().unwrap();

        let remaining = manager.list_backups().unwrap();
        // 2 newest kept; the January monthly is already among them, and the
        // monthly budget of 1 is spent on January, so December goes
        assert_eq!(remaining.len(), 2);
        assert_eq!(deleted.len(), 2);
    }
}
