//! Liability models
//!
//! A liability is a tracked debt with a creditor and an outstanding
//! balance. Payments are recorded separately so the history survives;
//! the stored balance is decremented on each payment and `doctor` can
//! cross-check the two.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{LiabilityId, LiabilityPaymentId, WalletId};
use super::money::Money;

/// A tracked debt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liability {
    /// Unique identifier
    pub id: LiabilityId,

    /// Debt name (e.g., "Car loan")
    pub name: String,

    /// Who the debt is owed to
    #[serde(default)]
    pub creditor: String,

    /// The amount originally owed
    pub original_amount: Money,

    /// The amount still outstanding
    pub balance: Money,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the liability was created
    pub created_at: DateTime<Utc>,

    /// When the liability was last modified
    pub updated_at: DateTime<Utc>,
}

impl Liability {
    /// Create a new liability
    pub fn new(name: impl Into<String>, creditor: impl Into<String>, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: LiabilityId::new(),
            name: name.into(),
            creditor: creditor.into(),
            original_amount: amount,
            balance: amount,
            due_date: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a payment, capped at the outstanding balance.
    /// Returns the amount actually applied.
    pub fn apply_payment(&mut self, amount: Money) -> Money {
        let applied = amount.min(self.balance);
        self.balance -= applied;
        self.updated_at = Utc::now();
        applied
    }

    /// Check whether the debt is fully paid off
    pub fn is_settled(&self) -> bool {
        self.balance.is_zero() || self.balance.is_negative()
    }

    /// Total paid so far according to the stored balance
    pub fn paid_amount(&self) -> Money {
        self.original_amount - self.balance
    }

    /// Validate the liability
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Liability name cannot be empty".into());
        }
        if !self.original_amount.is_positive() {
            return Err(format!(
                "Liability amount must be positive, got {}",
                self.original_amount
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Liability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.creditor.is_empty() {
            write!(f, "{} ({} outstanding)", self.name, self.balance)
        } else {
            write!(f, "{} to {} ({} outstanding)", self.name, self.creditor, self.balance)
        }
    }
}

/// A recorded payment against a liability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityPayment {
    /// Unique identifier
    pub id: LiabilityPaymentId,

    /// The liability this payment reduces
    pub liability_id: LiabilityId,

    /// The wallet the payment was drawn from
    pub wallet_id: Option<WalletId>,

    /// Amount paid
    pub amount: Money,

    /// Payment date
    pub date: NaiveDate,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the payment was recorded
    pub created_at: DateTime<Utc>,
}

impl LiabilityPayment {
    /// Record a payment
    pub fn new(liability_id: LiabilityId, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: LiabilityPaymentId::new(),
            liability_id,
            wallet_id: None,
            amount,
            date,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_payment() {
        let mut debt = Liability::new("Car loan", "Bank", Money::from_cents(500_000));
        assert!(!debt.is_settled());

        let applied = debt.apply_payment(Money::from_cents(200_000));
        assert_eq!(applied.cents(), 200_000);
        assert_eq!(debt.balance.cents(), 300_000);
        assert_eq!(debt.paid_amount().cents(), 200_000);
    }

    #[test]
    fn test_payment_capped_at_balance() {
        let mut debt = Liability::new("Loan", "Friend", Money::from_cents(10_000));
        let applied = debt.apply_payment(Money::from_cents(15_000));
        assert_eq!(applied.cents(), 10_000);
        assert_eq!(debt.balance, Money::zero());
        assert!(debt.is_settled());
    }

    #[test]
    fn test_validate() {
        let debt = Liability::new("", "Bank", Money::from_cents(100));
        assert!(debt.validate().is_err());

        let debt = Liability::new("Ok", "Bank", Money::zero());
        assert!(debt.validate().is_err());
    }
}
