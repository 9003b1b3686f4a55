//! Savings goal service
//!
//! A contribution touches three stores: the wallet balance goes down, the
//! goal's accumulated amount goes up, and an expense entry tagged with the
//! goal's name lands in the ledger. Withdrawing reverses all three.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, SavingsGoal, SavingsGoalId, Transaction, TransactionKind, WalletId};
use crate::storage::Storage;

use super::ensure_funds;

/// Service for savings goals
pub struct SavingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SavingsService<'a> {
    /// Create a new savings service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a goal
    pub fn create(
        &self,
        name: &str,
        target_amount: Money,
        target_date: Option<NaiveDate>,
        wallet_id: Option<WalletId>,
        emoji: Option<String>,
    ) -> FintrackResult<SavingsGoal> {
        if self.storage.savings_goals.get_by_name(name)?.is_some() {
            return Err(FintrackError::Duplicate {
                entity_type: "Savings goal",
                identifier: name.to_string(),
            });
        }

        if let Some(wallet_id) = wallet_id {
            self.storage
                .wallets
                .get(wallet_id)?
                .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;
        }

        let mut goal = SavingsGoal::new(name, target_amount);
        goal.target_date = target_date;
        goal.wallet_id = wallet_id;
        if let Some(emoji) = emoji {
            goal.emoji = emoji;
        }

        goal.validate().map_err(FintrackError::Validation)?;

        self.storage.savings_goals.upsert(goal.clone())?;
        self.storage.savings_goals.save()?;

        Ok(goal)
    }

    /// Find a goal by ID string or name
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<SavingsGoal>> {
        if let Ok(id) = identifier.parse::<SavingsGoalId>() {
            if let Some(goal) = self.storage.savings_goals.get(id)? {
                return Ok(Some(goal));
            }
        }
        self.storage.savings_goals.get_by_name(identifier)
    }

    /// Find a goal or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FintrackResult<SavingsGoal> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::goal_not_found(identifier))
    }

    /// Contribute to a goal from a wallet
    pub fn contribute(
        &self,
        goal_id: SavingsGoalId,
        wallet_id: WalletId,
        amount: Money,
        date: NaiveDate,
    ) -> FintrackResult<SavingsGoal> {
        if !amount.is_positive() {
            return Err(FintrackError::Validation(
                "Contribution amount must be positive".into(),
            ));
        }

        let mut goal = self
            .storage
            .savings_goals
            .get(goal_id)?
            .ok_or_else(|| FintrackError::goal_not_found(goal_id.to_string()))?;

        if goal.closed {
            return Err(FintrackError::Validation(format!(
                "Savings goal '{}' is closed",
                goal.name
            )));
        }

        let mut wallet = self
            .storage
            .wallets
            .get(wallet_id)?
            .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;

        ensure_funds(&wallet, amount)?;

        wallet.withdraw(amount);
        goal.contribute(amount);

        let txn = Transaction::new(TransactionKind::Expense, wallet_id, date, amount)
            .with_notes(format!("Savings: {}", goal.name));

        // Three independent writes
        self.storage.transactions.upsert(txn)?;
        self.storage.transactions.save()?;
        self.storage.savings_goals.upsert(goal.clone())?;
        self.storage.savings_goals.save()?;
        self.storage.wallets.upsert(wallet)?;
        self.storage.wallets.save()?;

        Ok(goal)
    }

    /// Take money back out of a goal into a wallet
    pub fn withdraw(
        &self,
        goal_id: SavingsGoalId,
        wallet_id: WalletId,
        amount: Money,
        date: NaiveDate,
    ) -> FintrackResult<SavingsGoal> {
        if !amount.is_positive() {
            return Err(FintrackError::Validation(
                "Withdrawal amount must be positive".into(),
            ));
        }

        let mut goal = self
            .storage
            .savings_goals
            .get(goal_id)?
            .ok_or_else(|| FintrackError::goal_not_found(goal_id.to_string()))?;

        if goal.current_amount < amount {
            return Err(FintrackError::Validation(format!(
                "Goal '{}' holds {}, cannot withdraw {}",
                goal.name, goal.current_amount, amount
            )));
        }

        let mut wallet = self
            .storage
            .wallets
            .get(wallet_id)?
            .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;

        goal.withdraw(amount);
        wallet.deposit(amount);

        let txn = Transaction::new(TransactionKind::Income, wallet_id, date, amount)
            .with_notes(format!("Savings withdrawal: {}", goal.name));

        self.storage.transactions.upsert(txn)?;
        self.storage.transactions.save()?;
        self.storage.savings_goals.upsert(goal.clone())?;
        self.storage.savings_goals.save()?;
        self.storage.wallets.upsert(wallet)?;
        self.storage.wallets.save()?;

        Ok(goal)
    }

    /// Close a goal
    pub fn close(&self, goal_id: SavingsGoalId) -> FintrackResult<SavingsGoal> {
        let mut goal = self
            .storage
            .savings_goals
            .get(goal_id)?
            .ok_or_else(|| FintrackError::goal_not_found(goal_id.to_string()))?;

        goal.close();
        self.storage.savings_goals.upsert(goal.clone())?;
        self.storage.savings_goals.save()?;

        Ok(goal)
    }

    /// List goals
    pub fn list(&self, include_closed: bool) -> FintrackResult<Vec<SavingsGoal>> {
        if include_closed {
            self.storage.savings_goals.get_all()
        } else {
            self.storage.savings_goals.get_open()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::Wallet;
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

    fn setup_wallet(storage: &Storage) -> WalletId {
        let wallet = Wallet::with_balance("Bank", Money::from_cents(100_000));
        let id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();
        storage.wallets.save().unwrap();
        id
    }

    #[test]
    fn test_contribute_touches_three_stores() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = SavingsService::new(&storage);

        let goal = service
            .create("Vacation", Money::from_cents(50_000), None, Some(wallet_id), None)
            .unwrap();

        let goal = service
            .contribute(goal.id, wallet_id, Money::from_cents(10_000), d(2025, 1, 5))
            .unwrap();

        assert_eq!(goal.current_amount.cents(), 10_000);
        assert_eq!(storage.wallets.get(wallet_id).unwrap().unwrap().balance.cents(), 90_000);
        assert_eq!(storage.transactions.count().unwrap(), 1);

        let txn = &storage.transactions.get_all().unwrap()[0];
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert!(txn.notes.contains("Vacation"));
    }

    #[test]
    fn test_contribute_rejects_overdraft() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = SavingsService::new(&storage);

        let goal = service
            .create("Big", Money::from_cents(10_000_000), None, None, None)
            .unwrap();

        let result = service.contribute(goal.id, wallet_id, Money::from_cents(200_000), d(2025, 1, 5));
        assert!(matches!(result, Err(FintrackError::InsufficientFunds { .. })));
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_withdraw_reverses_contribution() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = SavingsService::new(&storage);

        let goal = service
            .create("Vacation", Money::from_cents(50_000), None, None, None)
            .unwrap();
        service
            .contribute(goal.id, wallet_id, Money::from_cents(10_000), d(2025, 1, 5))
            .unwrap();

        let goal = service
            .withdraw(goal.id, wallet_id, Money::from_cents(4_000), d(2025, 2, 5))
            .unwrap();

        assert_eq!(goal.current_amount.cents(), 6_000);
        assert_eq!(storage.wallets.get(wallet_id).unwrap().unwrap().balance.cents(), 94_000);
        assert_eq!(storage.transactions.count().unwrap(), 2);
    }

    #[test]
    fn test_withdraw_more_than_saved_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = SavingsService::new(&storage);

        let goal = service
            .create("Vacation", Money::from_cents(50_000), None, None, None)
            .unwrap();

        let result = service.withdraw(goal.id, wallet_id, Money::from_cents(1), d(2025, 1, 5));
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }

    #[test]
    fn test_contribute_to_closed_goal_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = SavingsService::new(&storage);

        let goal = service
            .create("Done", Money::from_cents(1_000), None, None, None)
            .unwrap();
        service.close(goal.id).unwrap();

        let result = service.contribute(goal.id, wallet_id, Money::from_cents(100), d(2025, 1, 5));
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }
}
