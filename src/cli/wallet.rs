//! Wallet CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_wallet_details, format_wallet_list};
use crate::error::FintrackResult;
use crate::models::Money;
use crate::services::WalletService;
use crate::storage::Storage;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Create a new wallet
    Create {
        /// Wallet name
        name: String,
        /// Opening balance (e.g., "1000.00")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Emoji tag
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// List wallets
    List {
        /// Show archived wallets too
        #[arg(short, long)]
        all: bool,
    },
    /// Show wallet details
    Show {
        /// Wallet name or ID
        wallet: String,
    },
    /// Rename a wallet
    Rename {
        /// Wallet name or ID
        wallet: String,
        /// New name
        name: String,
    },
    /// Archive a wallet
    Archive {
        /// Wallet name or ID
        wallet: String,
    },
    /// Unarchive a wallet
    Unarchive {
        /// Wallet name or ID
        wallet: String,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(
    storage: &Storage,
    settings: &Settings,
    cmd: WalletCommands,
) -> FintrackResult<()> {
    let service = WalletService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        WalletCommands::Create {
            name,
            balance,
            emoji,
        } => {
            let opening: Money = super::parse_money(&balance)?;
            let wallet = service.create(&name, opening, emoji)?;

            println!("Created wallet: {} {}", wallet.emoji, wallet.name);
            println!("  Balance: {}", wallet.balance.format_with_symbol(symbol));
            println!("  ID: {}", wallet.id);
        }

        WalletCommands::List { all } => {
            let wallets = service.list(all)?;
            print!("{}", format_wallet_list(&wallets, symbol));
        }

        WalletCommands::Show { wallet } => {
            let found = service.require(&wallet)?;
            let ledger_balance = service.ledger_balance(found.id)?;
            print!("{}", format_wallet_details(&found, ledger_balance, symbol));
        }

        WalletCommands::Rename { wallet, name } => {
            let found = service.require(&wallet)?;
            let renamed = service.rename(found.id, &name)?;
            println!("Renamed wallet to '{}'", renamed.name);
        }

        WalletCommands::Archive { wallet } => {
            let found = service.require(&wallet)?;
            let archived = service.archive(found.id)?;
            println!("Archived wallet: {}", archived.name);
        }

        WalletCommands::Unarchive { wallet } => {
            let found = service.require(&wallet)?;
            let unarchived = service.unarchive(found.id)?;
            println!("Unarchived wallet: {}", unarchived.name);
        }
    }

    Ok(())
}
