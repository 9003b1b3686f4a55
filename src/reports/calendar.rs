//! Calendar report
//!
//! A textual month summary: per-day inflow and outflow totals for days
//! with activity, plus the bills falling due in the month.

use chrono::{Datelike, NaiveDate};

use crate::error::FintrackResult;
use crate::models::{BillReminder, Money, Period, TransactionKind};
use crate::storage::Storage;

/// Ledger activity on a single day
#[derive(Debug, Clone)]
pub struct DayActivity {
    pub date: NaiveDate,
    /// Income received that day
    pub inflow: Money,
    /// Expenses paid that day
    pub outflow: Money,
    /// Number of ledger entries that day (transfers included)
    pub entry_count: usize,
}

/// One month of activity and due bills
#[derive(Debug, Clone)]
pub struct CalendarReport {
    pub year: i32,
    pub month: u32,
    /// Days with at least one ledger entry, in date order
    pub days: Vec<DayActivity>,
    /// Bills whose due date falls inside the month
    pub bills_due: Vec<BillReminder>,
    /// Income total for the month
    pub total_inflow: Money,
    /// Expense total for the month
    pub total_outflow: Money,
}

impl CalendarReport {
    /// Generate the summary for one calendar month
    pub fn generate(storage: &Storage, year: i32, month: u32) -> FintrackResult<Self> {
        let anchor = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            crate::error::FintrackError::Validation(format!("Invalid month: {}-{}", year, month))
        })?;
        let (start, end) = Period::Monthly.window_containing(anchor);

        let transactions = storage.transactions.get_by_date_range(start, end)?;

        let mut days: Vec<DayActivity> = Vec::new();
        let mut total_inflow = Money::zero();
        let mut total_outflow = Money::zero();

        for txn in &transactions {
            let idx = match days.iter().position(|d| d.date == txn.date) {
                Some(idx) => idx,
                None => {
                    days.push(DayActivity {
                        date: txn.date,
                        inflow: Money::zero(),
                        outflow: Money::zero(),
                        entry_count: 0,
                    });
                    days.len() - 1
                }
            };
            let day = &mut days[idx];

            day.entry_count += 1;
            match txn.kind {
                TransactionKind::Income => {
                    day.inflow += txn.amount;
                    total_inflow += txn.amount;
                }
                TransactionKind::Expense => {
                    day.outflow += txn.amount;
                    total_outflow += txn.amount;
                }
                // Transfers move money between wallets without changing the
                // month's totals
                TransactionKind::Transfer => {}
            }
        }

        days.sort_by_key(|d| d.date);

        let bills_due = storage
            .bills
            .get_all()?
            .into_iter()
            .filter(|b| b.due_date.year() == year && b.due_date.month() == month)
            .collect();

        Ok(Self {
            year,
            month,
            days,
            bills_due,
            total_inflow,
            total_outflow,
        })
    }

    /// Inflow minus outflow for the month
    pub fn net(&self) -> Money {
        self.total_inflow - self.total_outflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{Transaction, Wallet};
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
    fn test_month_summary() {
        let (_temp_dir, storage) = create_test_storage();

        let wallet = Wallet::with_balance("Cash", Money::from_cents(100_000));
        let other = Wallet::new("Bank");
        let wallet_id = wallet.id;
        let other_id = other.id;
        storage.wallets.upsert(wallet).unwrap();
        storage.wallets.upsert(other).unwrap();

        storage
            .transactions
            .upsert(Transaction::income(wallet_id, d(2025, 1, 3), Money::from_cents(10_000)))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::expense(wallet_id, d(2025, 1, 3), Money::from_cents(2_500)))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::expense(wallet_id, d(2025, 1, 10), Money::from_cents(1_000)))
            .unwrap();
        // Transfers don't affect totals
        storage
            .transactions
            .upsert(Transaction::transfer(wallet_id, other_id, d(2025, 1, 10), Money::from_cents(5_000)))
            .unwrap();
        // Outside the month
        storage
            .transactions
            .upsert(Transaction::expense(wallet_id, d(2025, 2, 1), Money::from_cents(9_999)))
            .unwrap();

        let report = CalendarReport::generate(&storage, 2025, 1).unwrap();

        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].date, d(2025, 1, 3));
        assert_eq!(report.days[0].inflow.cents(), 10_000);
        assert_eq!(report.days[0].outflow.cents(), 2_500);
        assert_eq!(report.days[1].entry_count, 2);
        assert_eq!(report.total_inflow.cents(), 10_000);
        assert_eq!(report.total_outflow.cents(), 3_500);
        assert_eq!(report.net().cents(), 6_500);
    }

    #[test]
    fn test_bills_due_in_month() {
        let (_temp_dir, storage) = create_test_storage();

        storage
            .bills
            .upsert(crate::models::BillReminder::new(
                "Rent",
                Money::from_cents(80_000),
                d(2025, 1, 5),
            ))
            .unwrap();
        storage
            .bills
            .upsert(crate::models::BillReminder::new(
                "Insurance",
                Money::from_cents(30_000),
                d(2025, 6, 1),
            ))
            .unwrap();

        let report = CalendarReport::generate(&storage, 2025, 1).unwrap();
        assert_eq!(report.bills_due.len(), 1);
        assert_eq!(report.bills_due[0].name, "Rent");
    }

    #[test]
    fn test_invalid_month_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        assert!(CalendarReport::generate(&storage, 2025, 13).is_err());
    }
}
