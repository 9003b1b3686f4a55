//! Spending report
//!
//! Expense totals grouped by category over a date range.

use chrono::NaiveDate;

use crate::error::FintrackResult;
use crate::models::{CategoryId, Money, TransactionKind};
use crate::storage::Storage;

/// One category's share of spending
#[derive(Debug, Clone)]
pub struct SpendingRow {
    /// Category, None for uncategorized spending
    pub category_id: Option<CategoryId>,
    /// Category name for display
    pub category_name: String,
    /// Category emoji for display
    pub category_emoji: String,
    /// Total spent
    pub total: Money,
    /// Share of all spending in the range, whole percent
    pub percent: i64,
}

/// Spending grouped by category over a range
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// Rows, largest first
    pub rows: Vec<SpendingRow>,
    /// Total spending across all rows
    pub total: Money,
    /// Range the report covers
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SpendingReport {
    /// Generate a spending report for an inclusive date range
    pub fn generate(storage: &Storage, start: NaiveDate, end: NaiveDate) -> FintrackResult<Self> {
        let transactions = storage.transactions.get_by_date_range(start, end)?;

        let mut by_category: Vec<(Option<CategoryId>, Money)> = Vec::new();
        let mut total = Money::zero();

        for txn in transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
            total += txn.amount;
            match by_category.iter_mut().find(|(id, _)| *id == txn.category_id) {
                Some((_, sum)) => *sum += txn.amount,
                None => by_category.push((txn.category_id, txn.amount)),
            }
        }

        let mut rows = Vec::with_capacity(by_category.len());
        for (category_id, sum) in by_category {
            let (category_name, category_emoji) = match category_id {
                Some(id) => match storage.categories.get(id)? {
                    Some(category) => (category.name, category.emoji),
                    None => ("(deleted category)".to_string(), "🏷️".to_string()),
                },
                None => ("(uncategorized)".to_string(), "❔".to_string()),
            };

            let percent = if total.is_positive() {
                (sum.cents() as i128 * 100 / total.cents() as i128) as i64
            } else {
                0
            };

            rows.push(SpendingRow {
                category_id,
                category_name,
                category_emoji,
                total: sum,
                percent,
            });
        }

        rows.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(Self {
            rows,
            total,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{Category, CategoryKind, Transaction, Wallet};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_spending_groups_and_sorts() {
        let (_temp_dir, storage) = create_test_storage();

        let wallet = Wallet::with_balance("Cash", Money::from_cents(100_000));
        let wallet_id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();

        let food = Category::new("Food", CategoryKind::Expense);
        let food_id = food.id;
        storage.categories.upsert(food).unwrap();

        for (day, cents, category) in [
            (5, 3_000, Some(food_id)),
            (6, 2_000, Some(food_id)),
            (7, 4_000, None),
            // Income must not count as spending
        ] {
            let mut txn = Transaction::expense(wallet_id, d(2025, 1, day), Money::from_cents(cents));
            txn.category_id = category;
            storage.transactions.upsert(txn).unwrap();
        }
        storage
            .transactions
            .upsert(Transaction::income(wallet_id, d(2025, 1, 8), Money::from_cents(9_000)))
            .unwrap();

        let report = SpendingReport::generate(&storage, d(2025, 1, 1), d(2025, 1, 31)).unwrap();

        assert_eq!(report.total.cents(), 9_000);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].category_name, "Food");
        assert_eq!(report.rows[0].total.cents(), 5_000);
        assert_eq!(report.rows[0].percent, 55);
        assert_eq!(report.rows[1].category_name, "(uncategorized)");
    }

    #[test]
    fn test_empty_range() {
        let (_temp_dir, storage) = create_test_storage();
        let report = SpendingReport::generate(&storage, d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.total, Money::zero());
    }
}
