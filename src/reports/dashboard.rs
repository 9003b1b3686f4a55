//! Dashboard report
//!
//! The front-page overview: cash position across wallets, gold holdings
//! valued at the cached spot quote, open debts, savings progress, recent
//! ledger activity, and bills coming due.

use chrono::NaiveDate;

use crate::error::FintrackResult;
use crate::models::{BillReminder, GoldPriceQuote, Money, SavingsGoal, Transaction, Weight};
use crate::services::{BillService, GoldService, LiabilityService, WalletService};
use crate::storage::Storage;

/// How many recent ledger entries the dashboard shows
const RECENT_LIMIT: usize = 5;

/// How far ahead the dashboard looks for upcoming bills
const UPCOMING_DAYS: i64 = 14;

/// The dashboard overview
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// Total balance across active wallets
    pub total_cash: Money,
    /// Total alloy weight across active gold wallets
    pub gold_weight: Weight,
    /// Cash spent acquiring the current gold holdings
    pub gold_cost_basis: Money,
    /// Gold value at the cached quote, when one exists
    pub gold_value: Option<Money>,
    /// The quote used for valuation, when one exists
    pub quote: Option<GoldPriceQuote>,
    /// Outstanding debt across open liabilities
    pub liabilities_outstanding: Money,
    /// Open savings goals
    pub goals: Vec<SavingsGoal>,
    /// Most recent ledger entries
    pub recent_transactions: Vec<Transaction>,
    /// Unpaid bills due soon (or overdue)
    pub upcoming_bills: Vec<BillReminder>,
    /// Reference date the report was generated for
    pub as_of: NaiveDate,
}

impl DashboardReport {
    /// Generate the dashboard for a reference date
    pub fn generate(storage: &Storage, as_of: NaiveDate) -> FintrackResult<Self> {
        let wallets = WalletService::new(storage);
        let gold = GoldService::new(storage);
        let liabilities = LiabilityService::new(storage);
        let bills = BillService::new(storage);

        let total_cash = wallets.total_balance()?;
        let gold_weight = gold.total_weight()?;

        let gold_cost_basis: Money = storage
            .gold_wallets
            .get_active()?
            .iter()
            .map(|w| w.cost_basis)
            .sum();

        let quote = storage.gold_price.get()?;
        let gold_value = match &quote {
            Some(quote) => {
                let holdings = gold.holdings(quote.price_per_gram)?;
                Some(holdings.iter().map(|h| h.value).sum())
            }
            None => None,
        };

        let mut recent_transactions = storage.transactions.get_all()?;
        recent_transactions.truncate(RECENT_LIMIT);

        Ok(Self {
            total_cash,
            gold_weight,
            gold_cost_basis,
            gold_value,
            quote,
            liabilities_outstanding: liabilities.total_outstanding()?,
            goals: storage.savings_goals.get_open()?,
            recent_transactions,
            upcoming_bills: bills.due_within(as_of, UPCOMING_DAYS)?,
            as_of,
        })
    }

    /// Cash plus gold value minus outstanding debt. Falls back to the gold
    /// cost basis when no quote is cached.
    pub fn net_position(&self) -> Money {
        let gold = self.gold_value.unwrap_or(self.gold_cost_basis);
        self.total_cash + gold - self.liabilities_outstanding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{GoldPurity, TransactionKind, Wallet};
    use crate::services::{GoldPriceService, TransactionService};
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
    fn test_empty_dashboard() {
        let (_temp_dir, storage) = create_test_storage();
        let report = DashboardReport::generate(&storage, d(2025, 1, 15)).unwrap();

        assert_eq!(report.total_cash, Money::zero());
        assert!(report.gold_value.is_none());
        assert_eq!(report.net_position(), Money::zero());
        assert!(report.recent_transactions.is_empty());
    }

    #[test]
    fn test_dashboard_aggregates() {
        let (_temp_dir, storage) = create_test_storage();

        let wallet = Wallet::with_balance("Bank", Money::from_cents(500_000));
        let wallet_id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();
        storage.wallets.save().unwrap();

        // Some ledger activity
        let txns = TransactionService::new(&storage);
        for day in 1..=7 {
            txns.record(
                TransactionKind::Expense,
                wallet_id,
                Money::from_cents(1_000),
                d(2025, 1, day),
                None,
                None,
            )
            .unwrap();
        }

        // Gold valued at a manual quote
        let gold = GoldService::new(&storage);
        let vault = gold.create_wallet("Vault", GoldPurity::K24, None).unwrap();
        gold.buy(
            vault.id,
            wallet_id,
            Weight::from_grams(10),
            Money::from_cents(6_000),
            d(2025, 1, 8),
            None,
        )
        .unwrap();
        GoldPriceService::new(&storage)
            .set_manual(Money::from_cents(7_000), "USD")
            .unwrap();

        let report = DashboardReport::generate(&storage, d(2025, 1, 15)).unwrap();

        // 500,000 - 7,000 spent - 60,000 gold buy
        assert_eq!(report.total_cash.cents(), 433_000);
        assert_eq!(report.gold_weight.grams(), 10);
        assert_eq!(report.gold_cost_basis.cents(), 60_000);
        // fine weight 9.990 g at $70/g
        assert_eq!(report.gold_value.unwrap().cents(), 69_930);
        assert_eq!(report.recent_transactions.len(), 5);
        assert_eq!(
            report.net_position().cents(),
            433_000 + 69_930
        );
    }
}
