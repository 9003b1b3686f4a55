//! Category CLI commands

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Category, CategoryKind};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category kind (income, expense, transfer)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Emoji tag
        #[arg(short, long)]
        emoji: Option<String>,
    },
    /// List categories
    List,
    /// Archive a category
    Archive {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FintrackResult<()> {
    match cmd {
        CategoryCommands::Create { name, kind, emoji } => {
            let kind = CategoryKind::parse(&kind).ok_or_else(|| {
                FintrackError::Validation(format!(
                    "Invalid category kind: '{}'. Valid kinds: income, expense, transfer",
                    kind
                ))
            })?;

            if storage.categories.get_by_name(&name)?.is_some() {
                return Err(FintrackError::Duplicate {
                    entity_type: "Category",
                    identifier: name,
                });
            }

            let mut category = Category::new(&name, kind);
            if let Some(emoji) = emoji {
                category.emoji = emoji;
            }
            category
                .validate()
                .map_err(|e| FintrackError::Validation(e.to_string()))?;

            storage.categories.upsert(category.clone())?;
            storage.categories.save()?;

            println!("Created category: {} {} ({})", category.emoji, category.name, category.kind);
        }

        CategoryCommands::List => {
            let categories = storage.categories.get_all()?;
            if categories.is_empty() {
                println!("No categories. Run 'init' to seed the defaults.");
                return Ok(());
            }

            for kind in [CategoryKind::Income, CategoryKind::Expense, CategoryKind::Transfer] {
                let of_kind: Vec<_> = categories.iter().filter(|c| c.kind == kind).collect();
                if of_kind.is_empty() {
                    continue;
                }
                println!("{}:", kind);
                for category in of_kind {
                    println!(
                        "  {} {}{}",
                        category.emoji,
                        category.name,
                        if category.archived { " (archived)" } else { "" }
                    );
                }
            }
        }

        CategoryCommands::Archive { category } => {
            let mut found = storage
                .categories
                .get_by_name(&category)?
                .ok_or_else(|| FintrackError::category_not_found(&category))?;

            found.archive();
            let name = found.name.clone();
            storage.categories.upsert(found)?;
            storage.categories.save()?;

            println!("Archived category: {}", name);
        }
    }

    Ok(())
}
