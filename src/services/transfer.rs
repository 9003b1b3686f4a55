//! Transfer service
//!
//! A transfer is one ledger entry naming both wallets plus two balance
//! writes: the source is decremented and the destination incremented in
//! the same call.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Transaction, WalletId};
use crate::storage::Storage;

use super::ensure_funds;

/// Service for transfers between wallets
pub struct TransferService<'a> {
    storage: &'a Storage,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Move money between two wallets
    pub fn create(
        &self,
        from_id: WalletId,
        to_id: WalletId,
        amount: Money,
        date: NaiveDate,
        notes: Option<String>,
    ) -> FintrackResult<Transaction> {
        if !amount.is_positive() {
            return Err(FintrackError::Validation(
                "Transfer amount must be positive".into(),
            ));
        }

        if from_id == to_id {
            return Err(FintrackError::Validation(
                "Cannot transfer to the same wallet".into(),
            ));
        }

        let mut from = self.get_active_wallet(from_id)?;
        let mut to = self.get_active_wallet(to_id)?;

        ensure_funds(&from, amount)?;

        let mut txn = Transaction::transfer(from_id, to_id, date, amount);
        if let Some(notes) = notes {
            txn.notes = notes;
        }
        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        from.withdraw(amount);
        to.deposit(amount);

        // Three independent writes: ledger, then both balances
        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.wallets.upsert(from)?;
        self.storage.wallets.upsert(to)?;
        self.storage.wallets.save()?;

        Ok(txn)
    }

    /// Get an active (non-archived) wallet or return an error
    fn get_active_wallet(&self, id: WalletId) -> FintrackResult<crate::models::Wallet> {
        let wallet = self
            .storage
            .wallets
            .get(id)?
            .ok_or_else(|| FintrackError::wallet_not_found(id.to_string()))?;

        if wallet.archived {
            return Err(FintrackError::Validation(format!(
                "Wallet '{}' is archived and cannot be used for transfers",
                wallet.name
            )));
        }

        Ok(wallet)
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

    fn setup_wallets(storage: &Storage) -> (WalletId, WalletId) {
        let bank = Wallet::with_balance("Bank", Money::from_cents(100_000));
        let cash = Wallet::with_balance("Cash", Money::from_cents(5_000));
        let bank_id = bank.id;
        let cash_id = cash.id;

        storage.wallets.upsert(bank).unwrap();
        storage.wallets.upsert(cash).unwrap();
        storage.wallets.save().unwrap();

        (bank_id, cash_id)
    }

    #[test]
    fn test_transfer_moves_both_balances() {
        let (_temp_dir, storage) = create_test_storage();
        let (bank_id, cash_id) = setup_wallets(&storage);
        let service = TransferService::new(&storage);

        let txn = service
            .create(
                bank_id,
                cash_id,
                Money::from_cents(20_000),
                d(2025, 1, 15),
                Some("atm withdrawal".into()),
            )
            .unwrap();

        assert!(txn.is_transfer());
        assert_eq!(txn.wallet_id, bank_id);
        assert_eq!(txn.transfer_wallet_id, Some(cash_id));

        assert_eq!(storage.wallets.get(bank_id).unwrap().unwrap().balance.cents(), 80_000);
        assert_eq!(storage.wallets.get(cash_id).unwrap().unwrap().balance.cents(), 25_000);
        assert_eq!(storage.transactions.count().unwrap(), 1);
    }

    #[test]
    fn test_transfer_to_same_wallet_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let (bank_id, _) = setup_wallets(&storage);
        let service = TransferService::new(&storage);

        let result = service.create(bank_id, bank_id, Money::from_cents(100), d(2025, 1, 1), None);
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }

    #[test]
    fn test_transfer_rejects_overdraft() {
        let (_temp_dir, storage) = create_test_storage();
        let (bank_id, cash_id) = setup_wallets(&storage);
        let service = TransferService::new(&storage);

        let result = service.create(
            cash_id,
            bank_id,
            Money::from_cents(10_000),
            d(2025, 1, 1),
            None,
        );
        assert!(matches!(result, Err(FintrackError::InsufficientFunds { .. })));

        // Nothing moved
        assert_eq!(storage.wallets.get(cash_id).unwrap().unwrap().balance.cents(), 5_000);
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_transfer_zero_amount_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let (bank_id, cash_id) = setup_wallets(&storage);
        let service = TransferService::new(&storage);

        let result = service.create(bank_id, cash_id, Money::zero(), d(2025, 1, 1), None);
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }
}
