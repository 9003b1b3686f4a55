//! Budget service
//!
//! Budgets are one-per-category spending limits. Status is computed
//! against the expense transactions falling in the period window that
//! contains a reference date.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, BudgetId, CategoryId, CategoryKind, Money, Period, TransactionKind};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Computed standing of one budget in a period window
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    /// The budget itself
    pub budget: Budget,
    /// Category name for display
    pub category_name: String,
    /// Category emoji for display
    pub category_emoji: String,
    /// Window the status was computed over
    pub window: (NaiveDate, NaiveDate),
    /// Amount spent in the window
    pub spent: Money,
    /// Limit minus spent (negative when over budget)
    pub remaining: Money,
}

impl BudgetStatus {
    /// Spent as a percentage of the limit, uncapped
    pub fn percent_used(&self) -> i64 {
        if !self.budget.amount.is_positive() {
            return 0;
        }
        (self.spent.cents() as i128 * 100 / self.budget.amount.cents() as i128) as i64
    }

    /// Check whether spending exceeded the limit
    pub fn is_over(&self) -> bool {
        self.spent > self.budget.amount
    }
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set (create or replace) the budget for a category
    pub fn set(
        &self,
        category_id: CategoryId,
        amount: Money,
        period: Period,
    ) -> FintrackResult<Budget> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| FintrackError::category_not_found(category_id.to_string()))?;

        if category.kind != CategoryKind::Expense {
            return Err(FintrackError::Budget(format!(
                "Budgets only apply to expense categories; '{}' is {}",
                category.name, category.kind
            )));
        }

        // One budget per category: replace in place when one exists
        let budget = match self.storage.budgets.get_by_category(category_id)? {
            Some(mut existing) => {
                existing.set_amount(amount);
                existing.period = period;
                existing
            }
            None => Budget::new(category_id, amount, period),
        };

        budget
            .validate()
            .map_err(FintrackError::Validation)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        Ok(budget)
    }

    /// Remove a budget
    pub fn remove(&self, id: BudgetId) -> FintrackResult<()> {
        if !self.storage.budgets.delete(id)? {
            return Err(FintrackError::NotFound {
                entity_type: "Budget",
                identifier: id.to_string(),
            });
        }
        self.storage.budgets.save()
    }

    /// Status of every budget for the window containing `as_of`
    pub fn status_all(&self, as_of: NaiveDate) -> FintrackResult<Vec<BudgetStatus>> {
        let budgets = self.storage.budgets.get_all()?;
        let mut statuses = Vec::with_capacity(budgets.len());
        for budget in budgets {
            statuses.push(self.status(&budget, as_of)?);
        }
        Ok(statuses)
    }

    /// Status of a single budget for the window containing `as_of`
    pub fn status(&self, budget: &Budget, as_of: NaiveDate) -> FintrackResult<BudgetStatus> {
        let (start, end) = budget.period.window_containing(as_of);

        let spent: Money = self
            .storage
            .transactions
            .get_by_date_range(start, end)?
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .filter(|t| t.category_id == Some(budget.category_id))
            .map(|t| t.amount)
            .sum();

        let (category_name, category_emoji) = match self.storage.categories.get(budget.category_id)? {
            Some(category) => (category.name, category.emoji),
            None => ("(deleted category)".to_string(), "🏷️".to_string()),
        };

        Ok(BudgetStatus {
            remaining: budget.amount - spent,
            budget: budget.clone(),
            category_name,
            category_emoji,
            window: (start, end),
            spent,
        })
    }
}
