//! Budget model
//!
//! A budget is a per-category spending limit with a weekly, monthly, or
//! yearly cadence. Spending against the limit is computed from the
//! transaction ledger for the window containing a reference date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::Period;

/// A spending limit for a category over a recurring period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget limits
    pub category_id: CategoryId,

    /// The spending limit per period
    pub amount: Money,

    /// The recurring cadence
    pub period: Period,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(category_id: CategoryId, amount: Money, period: Period) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category_id,
            amount,
            period,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the limit
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_positive() {
            return Err(format!("Budget amount must be positive, got {}", self.amount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(CategoryId::new(), Money::from_cents(50_000), Period::Monthly);
        assert_eq!(budget.amount.cents(), 50_000);
        assert_eq!(budget.period, Period::Monthly);
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_set_amount() {
        let mut budget = Budget::new(CategoryId::new(), Money::from_cents(100), Period::Weekly);
        budget.set_amount(Money::from_cents(200));
        assert_eq!(budget.amount.cents(), 200);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let budget = Budget::new(CategoryId::new(), Money::zero(), Period::Monthly);
        assert!(budget.validate().is_err());
    }
}
