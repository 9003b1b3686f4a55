//! Gold service
//!
//! Buying gold is the widest ledger mutation in the tracker: the cash
//! wallet is debited, the gold wallet gains weight and cost basis, and a
//! gold ledger entry is appended. Selling reverses it; transfers move
//! weight and a proportional share of the cost basis between holdings.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    GoldPurity, GoldTransaction, GoldTransactionKind, GoldWallet, GoldWalletId, Money, Weight,
    WalletId,
};
use crate::storage::Storage;

use super::ensure_funds;

/// Service for gold holdings and the gold ledger
pub struct GoldService<'a> {
    storage: &'a Storage,
}

/// One gold wallet valued at a spot price
#[derive(Debug, Clone)]
pub struct GoldHolding {
    /// The holding
    pub wallet: GoldWallet,
    /// Market value of the fine weight at the quoted price
    pub value: Money,
    /// Value minus cost basis
    pub gain: Money,
}

impl<'a> GoldService<'a> {
    /// Create a new gold service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a gold wallet
    pub fn create_wallet(
        &self,
        name: &str,
        purity: GoldPurity,
        emoji: Option<String>,
    ) -> FintrackResult<GoldWallet> {
        if self.storage.gold_wallets.get_by_name(name)?.is_some() {
            return Err(FintrackError::Duplicate {
                entity_type: "Gold wallet",
                identifier: name.to_string(),
            });
        }

        let mut wallet = GoldWallet::new(name, purity);
        if let Some(emoji) = emoji {
            wallet.emoji = emoji;
        }

        wallet.validate().map_err(FintrackError::Validation)?;

        self.storage.gold_wallets.upsert(wallet.clone())?;
        self.storage.gold_wallets.save()?;

        Ok(wallet)
    }

    /// Find a gold wallet by ID string or name
    pub fn find_wallet(&self, identifier: &str) -> FintrackResult<Option<GoldWallet>> {
        if let Ok(id) = identifier.parse::<GoldWalletId>() {
            if let Some(wallet) = self.storage.gold_wallets.get(id)? {
                return Ok(Some(wallet));
            }
        }
        self.storage.gold_wallets.get_by_name(identifier)
    }

    /// Find a gold wallet or fail with a not-found error
    pub fn require_wallet(&self, identifier: &str) -> FintrackResult<GoldWallet> {
        self.find_wallet(identifier)?
            .ok_or_else(|| FintrackError::gold_wallet_not_found(identifier))
    }

    /// Buy gold into a holding, paying from a cash wallet.
    ///
    /// Updates three stores: the cash wallet balance, the gold wallet
    /// weight and cost basis, and the gold ledger.
    pub fn buy(
        &self,
        gold_wallet_id: GoldWalletId,
        cash_wallet_id: WalletId,
        weight: Weight,
        price_per_gram: Money,
        date: NaiveDate,
        notes: Option<String>,
    ) -> FintrackResult<GoldTransaction> {
        if !weight.is_positive() {
            return Err(FintrackError::Validation("Weight must be positive".into()));
        }
        if !price_per_gram.is_positive() {
            return Err(FintrackError::Validation(
                "Price per gram must be positive".into(),
            ));
        }

        let total = weight.value_at(price_per_gram);

        let mut gold = self
            .storage
            .gold_wallets
            .get(gold_wallet_id)?
            .ok_or_else(|| FintrackError::gold_wallet_not_found(gold_wallet_id.to_string()))?;

        let mut cash = self
            .storage
            .wallets
            .get(cash_wallet_id)?
            .ok_or_else(|| FintrackError::wallet_not_found(cash_wallet_id.to_string()))?;

        ensure_funds(&cash, total)?;

        cash.withdraw(total);
        gold.add(weight, total);

        let mut txn = GoldTransaction::new(GoldTransactionKind::Buy, gold_wallet_id, weight, date);
        txn.cash_wallet_id = Some(cash_wallet_id);
        txn.price_per_gram = price_per_gram;
        txn.total = total;
        if let Some(notes) = notes {
            txn.notes = notes;
        }

        self.storage.gold_transactions.upsert(txn.clone())?;
        self.storage.gold_transactions.save()?;
        self.storage.gold_wallets.upsert(gold)?;
        self.storage.gold_wallets.save()?;
        self.storage.wallets.upsert(cash)?;
        self.storage.wallets.save()?;

        Ok(txn)
    }

    /// Sell gold out of a holding, crediting a cash wallet.
    pub fn sell(
        &self,
        gold_wallet_id: GoldWalletId,
        cash_wallet_id: WalletId,
        weight: Weight,
        price_per_gram: Money,
        date: NaiveDate,
        notes: Option<String>,
    ) -> FintrackResult<GoldTransaction> {
        if !weight.is_positive() {
            return Err(FintrackError::Validation("Weight must be positive".into()));
        }
        if !price_per_gram.is_positive() {
            return Err(FintrackError::Validation(
                "Price per gram must be positive".into(),
            ));
        }

        let mut gold = self
            .storage
            .gold_wallets
            .get(gold_wallet_id)?
            .ok_or_else(|| FintrackError::gold_wallet_not_found(gold_wallet_id.to_string()))?;

        if gold.weight < weight {
            return Err(FintrackError::InsufficientGold {
                wallet: gold.name.clone(),
                needed: weight,
                available: gold.weight,
            });
        }

        let mut cash = self
            .storage
            .wallets
            .get(cash_wallet_id)?
            .ok_or_else(|| FintrackError::wallet_not_found(cash_wallet_id.to_string()))?;

        let total = weight.value_at(price_per_gram);
        let basis_share = gold.basis_share(weight);

        gold.remove(weight, basis_share);
        cash.deposit(total);

        let mut txn = GoldTransaction::new(GoldTransactionKind::Sell, gold_wallet_id, weight, date);
        txn.cash_wallet_id = Some(cash_wallet_id);
        txn.price_per_gram = price_per_gram;
        txn.total = total;
        if let Some(notes) = notes {
            txn.notes = notes;
        }

        self.storage.gold_transactions.upsert(txn.clone())?;
        self.storage.gold_transactions.save()?;
        self.storage.gold_wallets.upsert(gold)?;
        self.storage.gold_wallets.save()?;
        self.storage.wallets.upsert(cash)?;
        self.storage.wallets.save()?;

        Ok(txn)
    }

    /// Move weight between two gold holdings of the same purity, carrying
    /// a proportional share of the cost basis along.
    pub fn transfer(
        &self,
        from_id: GoldWalletId,
        to_id: GoldWalletId,
        weight: Weight,
        date: NaiveDate,
        notes: Option<String>,
    ) -> FintrackResult<GoldTransaction> {
        if !weight.is_positive() {
            return Err(FintrackError::Validation("Weight must be positive".into()));
        }
        if from_id == to_id {
            return Err(FintrackError::Validation(
                "Cannot transfer to the same gold wallet".into(),
            ));
        }

        let mut from = self
            .storage
            .gold_wallets
            .get(from_id)?
            .ok_or_else(|| FintrackError::gold_wallet_not_found(from_id.to_string()))?;
        let mut to = self
            .storage
            .gold_wallets
            .get(to_id)?
            .ok_or_else(|| FintrackError::gold_wallet_not_found(to_id.to_string()))?;

        if from.purity != to.purity {
            return Err(FintrackError::Validation(format!(
                "Cannot transfer between purities ({} -> {})",
                from.purity, to.purity
            )));
        }

        if from.weight < weight {
            return Err(FintrackError::InsufficientGold {
                wallet: from.name.clone(),
                needed: weight,
                available: from.weight,
            });
        }

        let basis_share = from.basis_share(weight);
        from.remove(weight, basis_share);
        to.add(weight, basis_share);

        let mut txn = GoldTransaction::new(GoldTransactionKind::Transfer, from_id, weight, date);
        txn.counter_gold_wallet_id = Some(to_id);
        if let Some(notes) = notes {
            txn.notes = notes;
        }

        self.storage.gold_transactions.upsert(txn.clone())?;
        self.storage.gold_transactions.save()?;
        self.storage.gold_wallets.upsert(from)?;
        self.storage.gold_wallets.upsert(to)?;
        self.storage.gold_wallets.save()?;

        Ok(txn)
    }

    /// All active holdings valued at a spot price
    pub fn holdings(&self, price_per_gram: Money) -> FintrackResult<Vec<GoldHolding>> {
        let wallets = self.storage.gold_wallets.get_active()?;
        Ok(wallets
            .into_iter()
            .map(|wallet| {
                let value = wallet.value_at(price_per_gram);
                GoldHolding {
                    gain: value - wallet.cost_basis,
                    value,
                    wallet,
                }
            })
            .collect())
    }

    /// Total alloy weight across active holdings
    pub fn total_weight(&self) -> FintrackResult<Weight> {
        Ok(self
            .storage
            .gold_wallets
            .get_active()?
            .iter()
            .map(|w| w.weight)
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

    fn setup(storage: &Storage) -> (GoldWalletId, WalletId) {
        let service = GoldService::new(storage);
        let vault = service.create_wallet("Vault", GoldPurity::K24, None).unwrap();

        let cash = Wallet::with_balance("Bank", Money::from_cents(1_000_000));
        let cash_id = cash.id;
        storage.wallets.upsert(cash).unwrap();
        storage.wallets.save().unwrap();

        (vault.id, cash_id)
    }

    #[test]
    fn test_buy_updates_three_stores() {
        let (_temp_dir, storage) = create_test_storage();
        let (vault_id, cash_id) = setup(&storage);
        let service = GoldService::new(&storage);

        // 10 g at $65.00/g = $650.00
        let txn = service
            .buy(
                vault_id,
                cash_id,
                Weight::from_grams(10),
                Money::from_cents(6_500),
                d(2025, 1, 10),
                None,
            )
            .unwrap();

        assert_eq!(txn.total.cents(), 65_000);

        let vault = storage.gold_wallets.get(vault_id).unwrap().unwrap();
        assert_eq!(vault.weight.grams(), 10);
        assert_eq!(vault.cost_basis.cents(), 65_000);

        let cash = storage.wallets.get(cash_id).unwrap().unwrap();
        assert_eq!(cash.balance.cents(), 935_000);

        assert_eq!(storage.gold_transactions.count().unwrap(), 1);
    }

    #[test]
    fn test_buy_rejects_overdraft() {
        let (_temp_dir, storage) = create_test_storage();
        let (vault_id, cash_id) = setup(&storage);
        let service = GoldService::new(&storage);

        // 1 kg at $65.00/g is far more than the bank holds
        let result = service.buy(
            vault_id,
            cash_id,
            Weight::from_grams(1_000),
            Money::from_cents(6_500),
            d(2025, 1, 10),
            None,
        );

        assert!(matches!(result, Err(FintrackError::InsufficientFunds { .. })));
        assert_eq!(storage.gold_transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_sell_moves_proportional_basis() {
        let (_temp_dir, storage) = create_test_storage();
        let (vault_id, cash_id) = setup(&storage);
        let service = GoldService::new(&storage);

        service
            .buy(
                vault_id,
                cash_id,
                Weight::from_grams(10),
                Money::from_cents(6_000),
                d(2025, 1, 10),
                None,
            )
            .unwrap();

        // Sell half at a higher price
        service
            .sell(
                vault_id,
                cash_id,
                Weight::from_grams(5),
                Money::from_cents(7_000),
                d(2025, 2, 10),
                None,
            )
            .unwrap();

        let vault = storage.gold_wallets.get(vault_id).unwrap().unwrap();
        assert_eq!(vault.weight.grams(), 5);
        assert_eq!(vault.cost_basis.cents(), 30_000);

        // 1,000,000 - 60,000 + 35,000
        let cash = storage.wallets.get(cash_id).unwrap().unwrap();
        assert_eq!(cash.balance.cents(), 975_000);
    }

    #[test]
    fn test_sell_more_than_held_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let (vault_id, cash_id) = setup(&storage);
        let service = GoldService::new(&storage);

        let result = service.sell(
            vault_id,
            cash_id,
            Weight::from_grams(1),
            Money::from_cents(6_500),
            d(2025, 1, 10),
            None,
        );
        assert!(matches!(result, Err(FintrackError::InsufficientGold { .. })));
    }

    #[test]
    fn test_transfer_between_holdings() {
        let (_temp_dir, storage) = create_test_storage();
        let (vault_id, cash_id) = setup(&storage);
        let service = GoldService::new(&storage);

        let safe = service.create_wallet("Safe", GoldPurity::K24, None).unwrap();

        service
            .buy(
                vault_id,
                cash_id,
                Weight::from_grams(10),
                Money::from_cents(6_000),
                d(2025, 1, 10),
                None,
            )
            .unwrap();

        let txn = service
            .transfer(vault_id, safe.id, Weight::from_grams(4), d(2025, 1, 20), None)
            .unwrap();
        assert_eq!(txn.counter_gold_wallet_id, Some(safe.id));

        let vault = storage.gold_wallets.get(vault_id).unwrap().unwrap();
        let safe = storage.gold_wallets.get(safe.id).unwrap().unwrap();
        assert_eq!(vault.weight.grams(), 6);
        assert_eq!(safe.weight.grams(), 4);
        assert_eq!(vault.cost_basis.cents(), 36_000);
        assert_eq!(safe.cost_basis.cents(), 24_000);
    }

    #[test]
    fn test_transfer_rejects_purity_mismatch() {
        let (_temp_dir, storage) = create_test_storage();
        let (vault_id, cash_id) = setup(&storage);
        let service = GoldService::new(&storage);

        let rings = service.create_wallet("Rings", GoldPurity::K18, None).unwrap();
        service
            .buy(
                vault_id,
                cash_id,
                Weight::from_grams(2),
                Money::from_cents(6_000),
                d(2025, 1, 10),
                None,
            )
            .unwrap();

        let result = service.transfer(vault_id, rings.id, Weight::from_grams(1), d(2025, 1, 20), None);
        assert!(matches!(result, Err(FintrackError::Validation(_))));
    }

    #[test]
    fn test_holdings_valuation() {
        let (_temp_dir, storage) = create_test_storage();
        let (vault_id, cash_id) = setup(&storage);
        let service = GoldService::new(&storage);

        service
            .buy(
                vault_id,
                cash_id,
                Weight::from_grams(10),
                Money::from_cents(6_000),
                d(2025, 1, 10),
                None,
            )
            .unwrap();

        // 24K fine weight 9.990 g at $70.00/g = $699.30
        let holdings = service.holdings(Money::from_cents(7_000)).unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].value.cents(), 69_930);
        assert_eq!(holdings[0].gain.cents(), 9_930);
    }
}
