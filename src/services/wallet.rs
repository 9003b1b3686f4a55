//! Wallet service
//!
//! Provides business logic for wallet management: creation with duplicate
//! checks, lookup by ID or name, renames, archival, and the ledger-derived
//! balance used by integrity checks.

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Wallet, WalletId};
use crate::storage::Storage;

/// Service for wallet management
pub struct WalletService<'a> {
    storage: &'a Storage,
}

impl<'a> WalletService<'a> {
    /// Create a new wallet service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a wallet
    pub fn create(
        &self,
        name: &str,
        opening_balance: Money,
        emoji: Option<String>,
    ) -> FintrackResult<Wallet> {
        if self.storage.wallets.name_exists(name, None)? {
            return Err(FintrackError::Duplicate {
                entity_type: "Wallet",
                identifier: name.to_string(),
            });
        }

        let mut wallet = Wallet::with_balance(name, opening_balance);
        if let Some(emoji) = emoji {
            wallet.emoji = emoji;
        }

        wallet
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.wallets.save()?;

        Ok(wallet)
    }

    /// Find a wallet by ID string or name
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<Wallet>> {
        if let Ok(id) = identifier.parse::<WalletId>() {
            if let Some(wallet) = self.storage.wallets.get(id)? {
                return Ok(Some(wallet));
            }
        }
        self.storage.wallets.get_by_name(identifier)
    }

    /// Find a wallet or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FintrackResult<Wallet> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::wallet_not_found(identifier))
    }

    /// Find an active wallet or fail
    pub fn require_active(&self, identifier: &str) -> FintrackResult<Wallet> {
        let wallet = self.require(identifier)?;
        if wallet.archived {
            return Err(FintrackError::Validation(format!(
                "Wallet '{}' is archived",
                wallet.name
            )));
        }
        Ok(wallet)
    }

    /// List all wallets
    pub fn list(&self, include_archived: bool) -> FintrackResult<Vec<Wallet>> {
        if include_archived {
            self.storage.wallets.get_all()
        } else {
            self.storage.wallets.get_active()
        }
    }

    /// Total balance across active wallets
    pub fn total_balance(&self) -> FintrackResult<Money> {
        Ok(self
            .storage
            .wallets
            .get_active()?
            .into_iter()
            .map(|w| w.balance)
            .sum())
    }

    /// Rename a wallet
    pub fn rename(&self, id: WalletId, name: &str) -> FintrackResult<Wallet> {
        if self.storage.wallets.name_exists(name, Some(id))? {
            return Err(FintrackError::Duplicate {
                entity_type: "Wallet",
                identifier: name.to_string(),
            });
        }

        let mut wallet = self
            .storage
            .wallets
            .get(id)?
            .ok_or_else(|| FintrackError::wallet_not_found(id.to_string()))?;

        wallet.rename(name);
        wallet
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.wallets.save()?;

        Ok(wallet)
    }

    /// Archive a wallet
    pub fn archive(&self, id: WalletId) -> FintrackResult<Wallet> {
        let mut wallet = self
            .storage
            .wallets
            .get(id)?
            .ok_or_else(|| FintrackError::wallet_not_found(id.to_string()))?;

        wallet.archive();
        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.wallets.save()?;

        Ok(wallet)
    }

    /// Unarchive a wallet
    pub fn unarchive(&self, id: WalletId) -> FintrackResult<Wallet> {
        let mut wallet = self
            .storage
            .wallets
            .get(id)?
            .ok_or_else(|| FintrackError::wallet_not_found(id.to_string()))?;

        wallet.unarchive();
        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.wallets.save()?;

        Ok(wallet)
    }

    /// The balance the ledger implies for a wallet: opening balance plus
    /// the signed sum of every transaction touching it.
    pub fn ledger_balance(&self, id: WalletId) -> FintrackResult<Money> {
        let wallet = self
            .storage
            .wallets
            .get(id)?
            .ok_or_else(|| FintrackError::wallet_not_found(id.to_string()))?;

        let applied: Money = self
            .storage
            .transactions
            .get_by_wallet(id)?
            .iter()
            .map(|t| t.signed_amount_for(id))
            .sum();

        Ok(wallet.opening_balance + applied)
    }
}
