//! Backup CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::Settings;
use crate::error::FintrackResult;
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a backup of all data
    Create,
    /// List available backups
    List,
    /// Restore from a backup file
    Restore {
        /// Path to the backup file
        file: PathBuf,
        /// Skip the safety backup of current state
        #[arg(long)]
        no_safety_backup: bool,
    },
    /// Delete backups beyond the retention policy
    Prune,
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BackupCommands,
) -> FintrackResult<()> {
    let manager = BackupManager::new(storage.paths().clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let path = manager.create_backup()?;
            println!("Backup written to {}", path.display());
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups yet. Create one with 'backup create'.");
                return Ok(());
            }

            for backup in backups {
                println!(
                    "{}  {:>8} bytes  {}",
                    backup.created_at.format("%Y-%m-%d %H:%M:%S"),
                    backup.size_bytes,
                    backup.filename,
                );
            }
        }

        BackupCommands::Restore {
            file,
            no_safety_backup,
        } => {
            let restore = RestoreManager::new(storage.paths().clone());

            // Check the archive parses before touching anything
            let validation = restore.validate_backup(&file)?;
            println!(
                "Restoring backup from {} (schema v{})",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S"),
                validation.schema_version,
            );

            if settings.auto_backup && !no_safety_backup {
                let safety = manager.create_backup()?;
                println!("Current state saved to {}", safety.display());
            }

            let result = restore.restore_from_file(&file)?;
            println!("Restored stores: {}", result.restored.join(", "));
            println!("Reload complete. Run 'doctor' to verify consistency.");
        }

        BackupCommands::Prune => {
            let deleted = manager.prune()?;
            if deleted.is_empty() {
                println!("Nothing to prune.");
            } else {
                println!("Pruned {} backup(s)", deleted.len());
            }
        }
    }

    Ok(())
}
