//! Export CLI commands

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::export::{export_gold_csv, export_transactions_csv, FullExport};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export everything as JSON
    Json {
        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the cash ledger as CSV
    Csv {
        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export the gold ledger instead of the cash ledger
        #[arg(long)]
        gold: bool,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FintrackResult<()> {
    match cmd {
        ExportCommands::Json { output } => {
            let export = FullExport::from_storage(storage)?;

            match output {
                Some(path) => {
                    let mut file = create_file(&path)?;
                    export.write_to(&mut file)?;
                    eprintln!(
                        "Exported {} transactions to {}",
                        export.metadata.transaction_count,
                        path.display()
                    );
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut lock = stdout.lock();
                    export.write_to(&mut lock)?;
                }
            }
        }

        ExportCommands::Csv { output, gold } => match output {
            Some(path) => {
                let file = create_file(&path)?;
                let count = if gold {
                    export_gold_csv(storage, file)?
                } else {
                    export_transactions_csv(storage, file)?
                };
                eprintln!("Exported {} rows to {}", count, path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let lock = stdout.lock();
                if gold {
                    export_gold_csv(storage, lock)?;
                } else {
                    export_transactions_csv(storage, lock)?;
                }
            }
        },
    }

    Ok(())
}

fn create_file(path: &PathBuf) -> FintrackResult<impl Write> {
    File::create(path)
        .map_err(|e| FintrackError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
