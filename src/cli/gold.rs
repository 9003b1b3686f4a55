//! Gold CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_gold_wallet_list, format_holdings_table};
use crate::error::{FintrackError, FintrackResult};
use crate::models::GoldPurity;
use crate::services::{GoldPriceService, GoldService, WalletService};
use crate::storage::Storage;

/// Gold subcommands
#[derive(Subcommand)]
pub enum GoldCommands {
    /// Gold wallet management
    #[command(subcommand)]
    Wallet(GoldWalletCommands),

    /// Buy gold into a holding, paying from a cash wallet
    Buy {
        /// Gold wallet name or ID
        gold_wallet: String,
        /// Weight in grams (e.g., "12.5")
        weight: String,
        /// Price per gram (e.g., "65.00")
        price: String,
        /// Cash wallet to pay from
        #[arg(short, long)]
        wallet: String,
        /// Trade date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Sell gold out of a holding, crediting a cash wallet
    Sell {
        /// Gold wallet name or ID
        gold_wallet: String,
        /// Weight in grams
        weight: String,
        /// Price per gram
        price: String,
        /// Cash wallet to credit
        #[arg(short, long)]
        wallet: String,
        /// Trade date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Move gold between two holdings of the same purity
    Transfer {
        /// Source gold wallet
        from: String,
        /// Destination gold wallet
        to: String,
        /// Weight in grams
        weight: String,
        /// Transfer date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show holdings valued at the cached spot quote
    Holdings,

    /// Spot price management
    #[command(subcommand)]
    Price(GoldPriceCommands),
}

/// Gold wallet subcommands
#[derive(Subcommand)]
pub enum GoldWalletCommands {
    /// Create a gold wallet
    Create {
        /// Holding name
        name: String,
        /// Purity (24k, 22k, 21k, 18k)
        #[arg(short, long, default_value = "24k")]
        purity: String,
        /// Emoji tag
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// List gold wallets
    List,
}

/// Spot price subcommands
#[derive(Subcommand)]
pub enum GoldPriceCommands {
    /// Show the cached quote
    Show,
    /// Set a manual per-gram price
    Set {
        /// Price per gram (e.g., "65.00")
        price: String,
    },
    /// Fetch the current spot price
    Fetch,
}

/// Handle a gold command
pub fn handle_gold_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoldCommands,
) -> FintrackResult<()> {
    let service = GoldService::new(storage);
    let prices = GoldPriceService::new(storage);
    let wallets = WalletService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        GoldCommands::Wallet(GoldWalletCommands::Create { name, purity, emoji }) => {
            let purity = GoldPurity::parse(&purity).ok_or_else(|| {
                FintrackError::Validation(format!(
                    "Invalid purity: '{}'. Valid purities: 24k, 22k, 21k, 18k",
                    purity
                ))
            })?;

            let wallet = service.create_wallet(&name, purity, emoji)?;
            println!("Created gold wallet: {} {} ({})", wallet.emoji, wallet.name, wallet.purity);
        }

        GoldCommands::Wallet(GoldWalletCommands::List) => {
            let wallets = storage.gold_wallets.get_all()?;
            print!("{}", format_gold_wallet_list(&wallets, symbol));
        }

        GoldCommands::Buy {
            gold_wallet,
            weight,
            price,
            wallet,
            date,
            notes,
        } => {
            let gold = service.require_wallet(&gold_wallet)?;
            let cash = wallets.require_active(&wallet)?;
            let weight = super::parse_weight(&weight)?;
            let price = super::parse_money(&price)?;
            let date = super::parse_date_or_today(date.as_deref())?;

            let txn = service.buy(gold.id, cash.id, weight, price, date, notes)?;
            println!(
                "Bought {} into '{}' for {} ({}/g)",
                txn.weight,
                gold.name,
                txn.total.format_with_symbol(symbol),
                txn.price_per_gram.format_with_symbol(symbol),
            );
        }

        GoldCommands::Sell {
            gold_wallet,
            weight,
            price,
            wallet,
            date,
            notes,
        } => {
            let gold = service.require_wallet(&gold_wallet)?;
            let cash = wallets.require_active(&wallet)?;
            let weight = super::parse_weight(&weight)?;
            let price = super::parse_money(&price)?;
            let date = super::parse_date_or_today(date.as_deref())?;

            let txn = service.sell(gold.id, cash.id, weight, price, date, notes)?;
            println!(
                "Sold {} from '{}' for {} ({}/g)",
                txn.weight,
                gold.name,
                txn.total.format_with_symbol(symbol),
                txn.price_per_gram.format_with_symbol(symbol),
            );
        }

        GoldCommands::Transfer { from, to, weight, date } => {
            let from = service.require_wallet(&from)?;
            let to = service.require_wallet(&to)?;
            let weight = super::parse_weight(&weight)?;
            let date = super::parse_date_or_today(date.as_deref())?;

            service.transfer(from.id, to.id, weight, date, None)?;
            println!("Moved {} from '{}' to '{}'", weight, from.name, to.name);
        }

        GoldCommands::Holdings => {
            let quote = prices.require_quote()?;
            let holdings = service.holdings(quote.price_per_gram)?;
            print!("{}", format_holdings_table(&holdings, &quote, symbol));
        }

        GoldCommands::Price(GoldPriceCommands::Show) => match prices.quote()? {
            Some(quote) => {
                println!(
                    "Gold: {}/g ({}, fetched {}, {}h ago)",
                    quote.price_per_gram.format_with_symbol(symbol),
                    quote.source,
                    quote.fetched_at.format("%Y-%m-%d %H:%M UTC"),
                    quote.age_hours(),
                );
            }
            None => {
                println!("No gold price on record. Run 'gold price fetch' or 'gold price set'.");
            }
        },

        GoldCommands::Price(GoldPriceCommands::Set { price }) => {
            let price = super::parse_money(&price)?;
            let quote = prices.set_manual(price, "USD")?;
            println!(
                "Gold price set to {}/g",
                quote.price_per_gram.format_with_symbol(symbol)
            );
        }

        GoldCommands::Price(GoldPriceCommands::Fetch) => {
            let quote = prices.fetch()?;
            println!(
                "Fetched gold price: {}/g (source: {})",
                quote.price_per_gram.format_with_symbol(symbol),
                quote.source
            );
        }
    }

    Ok(())
}
