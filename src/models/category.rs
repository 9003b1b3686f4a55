//! Category model
//!
//! Categories classify transactions as income, expense, or transfer and
//! carry an emoji used throughout the display layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// The kind of flow a category classifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
    Transfer,
}

impl CategoryKind {
    /// Parse a category kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (e.g., "Groceries")
    pub name: String,

    /// What kind of flow this category classifies
    pub kind: CategoryKind,

    /// Emoji tag shown next to the name
    #[serde(default = "default_emoji")]
    pub emoji: String,

    /// Sort order for display
    #[serde(default)]
    pub sort_order: i32,

    /// Whether this category is archived (soft-deleted)
    #[serde(default)]
    pub archived: bool,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_emoji() -> String {
    "🏷️".to_string()
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
            emoji: default_emoji(),
            sort_order: 0,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a category with an emoji and sort order (used by seeding)
    pub fn seeded(
        name: impl Into<String>,
        kind: CategoryKind,
        emoji: impl Into<String>,
        sort_order: i32,
    ) -> Self {
        let mut category = Self::new(name, kind);
        category.emoji = emoji.into();
        category.sort_order = sort_order;
        category
    }

    /// Mark this category as archived
    pub fn archive(&mut self) {
        self.archived = true;
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.emoji, self.name, self.kind)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries", CategoryKind::Expense);
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.kind, CategoryKind::Expense);
        assert!(!category.archived);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(CategoryKind::parse("income"), Some(CategoryKind::Income));
        assert_eq!(CategoryKind::parse("EXPENSE"), Some(CategoryKind::Expense));
        assert_eq!(CategoryKind::parse("loan"), None);
    }

    #[test]
    fn test_seeded() {
        let category = Category::seeded("Salary", CategoryKind::Income, "💼", 3);
        assert_eq!(category.emoji, "💼");
        assert_eq!(category.sort_order, 3);
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", CategoryKind::Expense);
        assert!(category.validate().is_ok());

        category.name = "  ".into();
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::EmptyName)
        );
    }
}
