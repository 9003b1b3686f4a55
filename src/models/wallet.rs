//! Wallet model
//!
//! A wallet is a named cash balance (pocket cash, a bank account, an
//! e-wallet). The stored balance is maintained by the ledger services and
//! should always equal the signed sum of the wallet's transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;
use super::money::Money;

/// A cash wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier
    pub id: WalletId,

    /// Wallet name (e.g., "Pocket Cash", "Main Bank")
    pub name: String,

    /// Emoji tag shown next to the name
    #[serde(default = "default_emoji")]
    pub emoji: String,

    /// Current balance, maintained by ledger mutations
    pub balance: Money,

    /// Balance the wallet was created with; the ledger accounts for the rest
    #[serde(default)]
    pub opening_balance: Money,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// Whether this wallet is archived (soft-deleted)
    #[serde(default)]
    pub archived: bool,

    /// Sort order for display
    #[serde(default)]
    pub sort_order: i32,

    /// When the wallet was created
    pub created_at: DateTime<Utc>,

    /// When the wallet was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_emoji() -> String {
    "💰".to_string()
}

impl Wallet {
    /// Create a new wallet with a zero balance
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: WalletId::new(),
            name: name.into(),
            emoji: default_emoji(),
            balance: Money::zero(),
            opening_balance: Money::zero(),
            notes: String::new(),
            archived: false,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new wallet with an opening balance
    pub fn with_balance(name: impl Into<String>, balance: Money) -> Self {
        let mut wallet = Self::new(name);
        wallet.balance = balance;
        wallet.opening_balance = balance;
        wallet
    }

    /// Set the emoji tag
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    /// Add to the balance
    pub fn deposit(&mut self, amount: Money) {
        self.balance += amount;
        self.updated_at = Utc::now();
    }

    /// Subtract from the balance. Callers enforce overdraft policy.
    pub fn withdraw(&mut self, amount: Money) {
        self.balance -= amount;
        self.updated_at = Utc::now();
    }

    /// Rename the wallet
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Mark this wallet as archived
    pub fn archive(&mut self) {
        self.archived = true;
        self.updated_at = Utc::now();
    }

    /// Unarchive this wallet
    pub fn unarchive(&mut self) {
        self.archived = false;
        self.updated_at = Utc::now();
    }

    /// Validate the wallet
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.name.trim().is_empty() {
            return Err(WalletValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(WalletValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.emoji, self.name, self.balance)
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Wallet name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for WalletValidationError {}
