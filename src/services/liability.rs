//! Liability service
//!
//! Paying a debt debits the wallet, appends a payment record, and
//! decrements the stored balance. The payment is capped at what is still
//! outstanding.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Liability, LiabilityId, LiabilityPayment, Money, WalletId};
use crate::storage::Storage;

use super::ensure_funds;

/// Service for liabilities and their payments
pub struct LiabilityService<'a> {
    storage: &'a Storage,
}

impl<'a> LiabilityService<'a> {
    /// Create a new liability service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a liability
    pub fn add(
        &self,
        name: &str,
        creditor: &str,
        amount: Money,
        due_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> FintrackResult<Liability> {
        if self.storage.liabilities.get_by_name(name)?.is_some() {
            return Err(FintrackError::Duplicate {
                entity_type: "Liability",
                identifier: name.to_string(),
            });
        }

        let mut liability = Liability::new(name, creditor, amount);
        liability.due_date = due_date;
        if let Some(notes) = notes {
            liability.notes = notes;
        }

        liability.validate().map_err(FintrackError::Validation)?;

        self.storage.liabilities.upsert(liability.clone())?;
        self.storage.liabilities.save()?;

        Ok(liability)
    }

    /// Find a liability by ID string or name
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<Liability>> {
        if let Ok(id) = identifier.parse::<LiabilityId>() {
            if let Some(liability) = self.storage.liabilities.get(id)? {
                return Ok(Some(liability));
            }
        }
        self.storage.liabilities.get_by_name(identifier)
    }

    /// Find a liability or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FintrackResult<Liability> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::liability_not_found(identifier))
    }

    /// Pay down a liability from a wallet.
    ///
    /// The amount is capped at the outstanding balance; the wallet is
    /// debited by what was actually applied.
    pub fn pay(
        &self,
        liability_id: LiabilityId,
        wallet_id: WalletId,
        amount: Money,
        date: NaiveDate,
        notes: Option<String>,
    ) -> FintrackResult<(Liability, LiabilityPayment)> {
        if !amount.is_positive() {
            return Err(FintrackError::Validation(
                "Payment amount must be positive".into(),
            ));
        }

        let mut liability = self
            .storage
            .liabilities
            .get(liability_id)?
            .ok_or_else(|| FintrackError::liability_not_found(liability_id.to_string()))?;

        if liability.is_settled() {
            return Err(FintrackError::Validation(format!(
                "Liability '{}' is already settled",
                liability.name
            )));
        }

        let mut wallet = self
            .storage
            .wallets
            .get(wallet_id)?
            .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;

        let applied = amount.min(liability.balance);
        ensure_funds(&wallet, applied)?;

        wallet.withdraw(applied);
        liability.apply_payment(applied);

        let mut payment = LiabilityPayment::new(liability_id, applied, date);
        payment.wallet_id = Some(wallet_id);
        if let Some(notes) = notes {
            payment.notes = notes;
        }

        // Three independent writes: payment record, balance, wallet
        self.storage.liabilities.add_payment(payment.clone())?;
        self.storage.liabilities.upsert(liability.clone())?;
        self.storage.liabilities.save()?;
        self.storage.wallets.upsert(wallet)?;
        self.storage.wallets.save()?;

        Ok((liability, payment))
    }

    /// Remove a liability and its payment history
    pub fn remove(&self, liability_id: LiabilityId) -> FintrackResult<()> {
        if !self.storage.liabilities.delete(liability_id)? {
            return Err(FintrackError::liability_not_found(liability_id.to_string()));
        }
        self.storage.liabilities.save()
    }

    /// List liabilities
    pub fn list(&self, include_settled: bool) -> FintrackResult<Vec<Liability>> {
        if include_settled {
            self.storage.liabilities.get_all()
        } else {
            self.storage.liabilities.get_open()
        }
    }

    /// Payment history for a liability, newest first
    pub fn payments(&self, liability_id: LiabilityId) -> FintrackResult<Vec<LiabilityPayment>> {
        self.storage.liabilities.get_payments(liability_id)
    }

    /// Total outstanding across open liabilities
    pub fn total_outstanding(&self) -> FintrackResult<Money> {
        Ok(self
            .storage
            .liabilities
            .get_open()?
            .iter()
            .map(|l| l.balance)
            .sum())
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
    fn test_pay_decrements_balance_and_records_payment() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = LiabilityService::new(&storage);

        let debt = service
            .add("Car loan", "Bank", Money::from_cents(50_000), None, None)
            .unwrap();

        let (debt, payment) = service
            .pay(debt.id, wallet_id, Money::from_cents(20_000), d(2025, 1, 15), None)
            .unwrap();

        assert_eq!(debt.balance.cents(), 30_000);
        assert_eq!(payment.amount.cents(), 20_000);
        assert_eq!(storage.wallets.get(wallet_id).unwrap().unwrap().balance.cents(), 80_000);
        assert_eq!(service.payments(debt.id).unwrap().len(), 1);
    }

    #[test]
    fn test_overpayment_is_capped() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = LiabilityService::new(&storage);

        let debt = service
            .add("Small", "Friend", Money::from_cents(5_000), None, None)
            .unwrap();

        let (debt, payment) = service
            .pay(debt.id, wallet_id, Money::from_cents(9_999), d(2025, 1, 15), None)
            .unwrap();

        // Only the outstanding amount leaves the wallet
        assert_eq!(payment.amount.cents(), 5_000);
        assert!(debt.is_settled());
        assert_eq!(storage.wallets.get(wallet_id).unwrap().unwrap().balance.cents(), 95_000);
    }

    #[test]
    fn test_pay_settled_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = LiabilityService::new(&storage);

        let debt = service
            .add("Loan", "Friend", Money::from_cents(1_000), None, None)
            .unwrap();
        service
            .pay(debt.id, wallet_id, Money::from_cents(1_000), d(2025, 1, 15), None)
            .unwrap();

        let result = service.pay(debt.id, wallet_id, Money::from_cents(1), d(2025, 1, 16), None);
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }

    #[test]
    fn test_total_outstanding_skips_settled() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = LiabilityService::new(&storage);

        service
            .add("Open", "Bank", Money::from_cents(30_000), None, None)
            .unwrap();
        let settled = service
            .add("Settled", "Friend", Money::from_cents(2_000), None, None)
            .unwrap();
        service
            .pay(settled.id, wallet_id, Money::from_cents(2_000), d(2025, 1, 15), None)
            .unwrap();

        assert_eq!(service.total_outstanding().unwrap().cents(), 30_000);
    }

    #[test]
    fn test_remove_clears_history() {
        let (_temp_dir, storage) = create_test_storage();
        let wallet_id = setup_wallet(&storage);
        let service = LiabilityService::new(&storage);

        let debt = service
            .add("Loan", "Friend", Money::from_cents(1_000), None, None)
            .unwrap();
        service
            .pay(debt.id, wallet_id, Money::from_cents(500), d(2025, 1, 15), None)
            .unwrap();

        service.remove(debt.id).unwrap();
        assert!(service.payments(debt.id).unwrap().is_empty());
    }
}
