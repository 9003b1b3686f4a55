//! Transaction model
//!
//! A transaction is one ledger entry against a wallet: income, expense, or
//! a transfer to another wallet. Amounts are stored as positive magnitudes;
//! the kind carries the direction, and the signed effect on a given wallet
//! is computed on demand.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId, WalletId};
use super::money::Money;

/// The kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
    Transfer,
}

impl TransactionKind {
    /// Parse a transaction kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// What kind of entry this is
    pub kind: TransactionKind,

    /// Amount as a positive magnitude; `kind` carries the direction
    pub amount: Money,

    /// The wallet this entry belongs to (the source, for transfers)
    pub wallet_id: WalletId,

    /// Destination wallet for transfers
    pub transfer_wallet_id: Option<WalletId>,

    /// Category (None for transfers and uncategorized entries)
    pub category_id: Option<CategoryId>,

    /// Ledger date
    pub date: NaiveDate,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(kind: TransactionKind, wallet_id: WalletId, date: NaiveDate, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            wallet_id,
            transfer_wallet_id: None,
            category_id: None,
            date,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an income entry
    pub fn income(wallet_id: WalletId, date: NaiveDate, amount: Money) -> Self {
        Self::new(TransactionKind::Income, wallet_id, date, amount)
    }

    /// Create an expense entry
    pub fn expense(wallet_id: WalletId, date: NaiveDate, amount: Money) -> Self {
        Self::new(TransactionKind::Expense, wallet_id, date, amount)
    }

    /// Create a transfer entry from one wallet to another
    pub fn transfer(from: WalletId, to: WalletId, date: NaiveDate, amount: Money) -> Self {
        let mut txn = Self::new(TransactionKind::Transfer, from, date, amount);
        txn.transfer_wallet_id = Some(to);
        txn
    }

    /// Attach a category
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Check if this is a transfer
    pub fn is_transfer(&self) -> bool {
        self.kind == TransactionKind::Transfer
    }

    /// The signed effect of this entry on the given wallet's balance.
    /// Returns zero for wallets this entry does not touch.
    pub fn signed_amount_for(&self, wallet_id: WalletId) -> Money {
        match self.kind {
            TransactionKind::Income => {
                if self.wallet_id == wallet_id {
                    self.amount
                } else {
                    Money::zero()
                }
            }
            TransactionKind::Expense => {
                if self.wallet_id == wallet_id {
                    -self.amount
                } else {
                    Money::zero()
                }
            }
            TransactionKind::Transfer => {
                if self.wallet_id == wallet_id {
                    -self.amount
                } else if self.transfer_wallet_id == Some(wallet_id) {
                    self.amount
                } else {
                    Money::zero()
                }
            }
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        match self.kind {
            TransactionKind::Transfer => {
                let to = self
                    .transfer_wallet_id
                    .ok_or(TransactionValidationError::TransferWithoutDestination)?;
                if to == self.wallet_id {
                    return Err(TransactionValidationError::TransferToSameWallet);
                }
            }
            _ => {
                if self.transfer_wallet_id.is_some() {
                    return Err(TransactionValidationError::DestinationOnNonTransfer);
                }
            }
        }

        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    TransferWithoutDestination,
    TransferToSameWallet,
    DestinationOnNonTransfer,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::TransferWithoutDestination => {
                write!(f, "Transfer must name a destination wallet")
            }
            Self::TransferToSameWallet => {
                write!(f, "Cannot transfer to the same wallet")
            }
            Self::DestinationOnNonTransfer => {
                write!(f, "Only transfers may name a destination wallet")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_income_expense_ctors() {
        let wallet = WalletId::new();
        let inc = Transaction::income(wallet, date(), Money::from_cents(5000));
        assert_eq!(inc.kind, TransactionKind::Income);
        assert!(inc.validate().is_ok());

        let exp = Transaction::expense(wallet, date(), Money::from_cents(5000));
        assert_eq!(exp.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_signed_amount_for() {
        let from = WalletId::new();
        let to = WalletId::new();
        let other = WalletId::new();

        let inc = Transaction::income(from, date(), Money::from_cents(100));
        assert_eq!(inc.signed_amount_for(from).cents(), 100);
        assert_eq!(inc.signed_amount_for(other).cents(), 0);

        let exp = Transaction::expense(from, date(), Money::from_cents(100));
        assert_eq!(exp.signed_amount_for(from).cents(), -100);

        let xfer = Transaction::transfer(from, to, date(), Money::from_cents(100));
        assert_eq!(xfer.signed_amount_for(from).cents(), -100);
        assert_eq!(xfer.signed_amount_for(to).cents(), 100);
        assert_eq!(xfer.signed_amount_for(other).cents(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_transfers() {
        let wallet = WalletId::new();

        let mut txn = Transaction::transfer(wallet, wallet, date(), Money::from_cents(100));
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::TransferToSameWallet)
        );

        txn.transfer_wallet_id = None;
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::TransferWithoutDestination)
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let txn = Transaction::expense(WalletId::new(), date(), Money::zero());
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::income(WalletId::new(), date(), Money::from_cents(100))
            .with_notes("salary");
        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn.id, deserialized.id);
        assert_eq!(deserialized.notes, "salary");
    }
}
