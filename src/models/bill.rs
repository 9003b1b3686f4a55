//! Bill reminder model
//!
//! A bill is a payment reminder with a due date. Recurring bills roll
//! their due date forward when paid; one-shot bills are marked paid.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BillId, CategoryId, WalletId};
use super::money::Money;
use super::period::Period;

/// A bill reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillReminder {
    /// Unique identifier
    pub id: BillId,

    /// Bill name (e.g., "Rent", "Internet")
    pub name: String,

    /// Amount due each cycle
    pub amount: Money,

    /// Next (or only) due date
    pub due_date: NaiveDate,

    /// Wallet the bill is paid from by default
    pub wallet_id: Option<WalletId>,

    /// Category applied to the payment transaction
    pub category_id: Option<CategoryId>,

    /// Recurrence cadence; None for one-shot bills
    pub recurrence: Option<Period>,

    /// Whether a one-shot bill has been paid
    #[serde(default)]
    pub paid: bool,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the bill was created
    pub created_at: DateTime<Utc>,

    /// When the bill was last modified
    pub updated_at: DateTime<Utc>,
}

impl BillReminder {
    /// Create a new one-shot bill
    pub fn new(name: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: BillId::new(),
            name: name.into(),
            amount,
            due_date,
            wallet_id: None,
            category_id: None,
            recurrence: None,
            paid: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Make the bill recurring
    pub fn with_recurrence(mut self, period: Period) -> Self {
        self.recurrence = Some(period);
        self
    }

    /// Check whether the bill is recurring
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Check whether the bill is overdue as of `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.paid && self.due_date < today
    }

    /// Days until the due date (negative if overdue)
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    /// Settle one cycle of the bill: recurring bills roll the due date
    /// forward and stay payable, one-shot bills are marked paid.
    pub fn settle(&mut self) {
        match self.recurrence {
            Some(period) => {
                self.due_date = period.advance(self.due_date);
            }
            None => {
                self.paid = true;
            }
        }
        self.updated_at = Utc::now();
    }

    /// Validate the bill
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Bill name cannot be empty".into());
        }
        if !self.amount.is_positive() {
            return Err(format!("Bill amount must be positive, got {}", self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for BillReminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cadence = match self.recurrence {
            Some(period) => format!(", {}", period),
            None => String::new(),
        };
        write!(f, "{} ({} due {}{})", self.name, self.amount, self.due_date, cadence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_one_shot_settle() {
        let mut bill = BillReminder::new("Car tax", Money::from_cents(12_000), d(2025, 4, 1));
        assert!(!bill.paid);

        bill.settle();
        assert!(bill.paid);
        assert_eq!(bill.due_date, d(2025, 4, 1));
    }

    #[test]
    fn test_recurring_settle_advances() {
        let mut bill = BillReminder::new("Rent", Money::from_cents(80_000), d(2025, 1, 31))
            .with_recurrence(Period::Monthly);

        bill.settle();
        assert!(!bill.paid);
        assert_eq!(bill.due_date, d(2025, 2, 28));

        bill.settle();
        assert_eq!(bill.due_date, d(2025, 3, 28));
    }

    #[test]
    fn test_overdue() {
        let bill = BillReminder::new("Internet", Money::from_cents(4_000), d(2025, 1, 10));
        assert!(bill.is_overdue(d(2025, 1, 11)));
        assert!(!bill.is_overdue(d(2025, 1, 10)));
        assert_eq!(bill.days_until_due(d(2025, 1, 5)), 5);
        assert_eq!(bill.days_until_due(d(2025, 1, 12)), -2);
    }

    #[test]
    fn test_validate() {
        let bill = BillReminder::new("", Money::from_cents(100), d(2025, 1, 1));
        assert!(bill.validate().is_err());

        let bill = BillReminder::new("Ok", Money::zero(), d(2025, 1, 1));
        assert!(bill.validate().is_err());
    }
}
