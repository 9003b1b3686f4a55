//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::FintrackPaths;
use crate::error::FintrackError;
use crate::models::{Category, CategoryKind, Wallet};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the default categories and a starter Cash wallet. Existing
/// files are never overwritten.
pub fn initialize_storage(paths: &FintrackPaths) -> Result<(), FintrackError> {
    // Ensure all directories exist
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        create_default_categories(paths)?;
    }

    if !paths.wallets_file().exists() {
        create_default_wallet(paths)?;
    }

    Ok(())
}

/// The default category seed: (name, kind, emoji)
fn default_category_seed() -> Vec<(&'static str, CategoryKind, &'static str)> {
    vec![
        ("Salary", CategoryKind::Income, "💼"),
        ("Side Income", CategoryKind::Income, "🪧"),
        ("Gift", CategoryKind::Income, "🎁"),
        ("Groceries", CategoryKind::Expense, "🛒"),
        ("Dining Out", CategoryKind::Expense, "🍽️"),
        ("Transport", CategoryKind::Expense, "🚌"),
        ("Utilities", CategoryKind::Expense, "💡"),
        ("Rent", CategoryKind::Expense, "🏠"),
        ("Health", CategoryKind::Expense, "🏥"),
        ("Entertainment", CategoryKind::Expense, "🎬"),
        ("Shopping", CategoryKind::Expense, "🛍️"),
        ("Savings", CategoryKind::Expense, "🎯"),
        ("Debt Payment", CategoryKind::Expense, "📉"),
        ("Transfer", CategoryKind::Transfer, "🔁"),
    ]
}

/// Create the default categories
fn create_default_categories(paths: &FintrackPaths) -> Result<(), FintrackError> {
    let categories = default_category_seed()
        .into_iter()
        .enumerate()
        .map(|(i, (name, kind, emoji))| Category::seeded(name, kind, emoji, i as i32))
        .collect();

    let data = CategoryData { categories };
    write_json_atomic(paths.categories_file(), &data)?;

    Ok(())
}

/// Serializable wallet seed structure, matching the wallet repository format
#[derive(serde::Serialize)]
struct WalletSeed {
    wallets: Vec<Wallet>,
}

/// Create the starter Cash wallet
fn create_default_wallet(paths: &FintrackPaths) -> Result<(), FintrackError> {
    let seed = WalletSeed {
        wallets: vec![Wallet::new("Cash").with_emoji("💵")],
    };
    write_json_atomic(paths.wallets_file(), &seed)?;

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FintrackPaths) -> bool {
    !paths.categories_file().exists()
}
