//! Savings goal model
//!
//! A savings goal accumulates contributions toward a target amount,
//! optionally tied to a wallet the contributions are drawn from.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{SavingsGoalId, WalletId};
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Unique identifier
    pub id: SavingsGoalId,

    /// Goal name (e.g., "Emergency Fund")
    pub name: String,

    /// Emoji tag shown next to the name
    #[serde(default = "default_emoji")]
    pub emoji: String,

    /// Target amount to reach
    pub target_amount: Money,

    /// Accumulated contributions so far
    pub current_amount: Money,

    /// Optional deadline
    pub target_date: Option<NaiveDate>,

    /// Wallet contributions are drawn from by default
    pub wallet_id: Option<WalletId>,

    /// Whether the goal has been closed
    #[serde(default)]
    pub closed: bool,

    /// When the goal was created
    pub created_at: DateTime<Utc>,

    /// When the goal was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_emoji() -> String {
    "🎯".to_string()
}

impl SavingsGoal {
    /// Create a new goal
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: SavingsGoalId::new(),
            name: name.into(),
            emoji: default_emoji(),
            target_amount,
            current_amount: Money::zero(),
            target_date: None,
            wallet_id: None,
            closed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a contribution
    pub fn contribute(&mut self, amount: Money) {
        self.current_amount += amount;
        self.updated_at = Utc::now();
    }

    /// Take money back out of the goal. Callers validate the amount does
    /// not exceed the accumulated total.
    pub fn withdraw(&mut self, amount: Money) {
        self.current_amount -= amount;
        self.updated_at = Utc::now();
    }

    /// Amount still missing to reach the target (zero once reached)
    pub fn remaining(&self) -> Money {
        if self.current_amount >= self.target_amount {
            Money::zero()
        } else {
            self.target_amount - self.current_amount
        }
    }

    /// Progress toward the target in whole percent, capped at 100
    pub fn progress_percent(&self) -> u8 {
        if !self.target_amount.is_positive() {
            return 100;
        }
        let pct = self.current_amount.cents() as i128 * 100 / self.target_amount.cents() as i128;
        pct.clamp(0, 100) as u8
    }

    /// Check whether the target has been reached
    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Close the goal
    pub fn close(&mut self) {
        self.closed = true;
        self.updated_at = Utc::now();
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Savings goal name cannot be empty".into());
        }
        if !self.target_amount.is_positive() {
            return Err(format!(
                "Savings goal target must be positive, got {}",
                self.target_amount
            ));
        }
        Ok(())
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} / {})",
            self.emoji, self.name, self.current_amount, self.target_amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let mut goal = SavingsGoal::new("Vacation", Money::from_cents(100_000));
        assert_eq!(goal.progress_percent(), 0);
        assert_eq!(goal.remaining().cents(), 100_000);
        assert!(!goal.is_reached());

        goal.contribute(Money::from_cents(25_000));
        assert_eq!(goal.progress_percent(), 25);
        assert_eq!(goal.remaining().cents(), 75_000);

        goal.contribute(Money::from_cents(80_000));
        assert_eq!(goal.progress_percent(), 100);
        assert_eq!(goal.remaining(), Money::zero());
        assert!(goal.is_reached());
    }

    #[test]
    fn test_withdraw() {
        let mut goal = SavingsGoal::new("Vacation", Money::from_cents(100_000));
        goal.contribute(Money::from_cents(50_000));
        goal.withdraw(Money::from_cents(20_000));
        assert_eq!(goal.current_amount.cents(), 30_000);
    }

    #[test]
    fn test_validate() {
        let goal = SavingsGoal::new("", Money::from_cents(100));
        assert!(goal.validate().is_err());

        let goal = SavingsGoal::new("Ok", Money::zero());
        assert!(goal.validate().is_err());
    }
}
