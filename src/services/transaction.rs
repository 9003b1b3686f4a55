//! Transaction service
//!
//! Recording an income or expense is the basic ledger mutation: the entry
//! is appended to the transaction store and the wallet balance is updated
//! in the same call, then both stores are persisted.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    CategoryId, Money, Transaction, TransactionId, TransactionKind, WalletId,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by wallet
    pub wallet_id: Option<WalletId>,
    /// Filter by category
    pub category_id: Option<CategoryId>,
    /// Filter by kind
    pub kind: Option<TransactionKind>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by wallet
    pub fn wallet(mut self, wallet_id: WalletId) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    /// Filter by category
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filter by kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an income or expense against a wallet.
    ///
    /// Appends the ledger entry and applies the balance change to the
    /// wallet, persisting both stores. Transfers go through
    /// `TransferService` instead.
    pub fn record(
        &self,
        kind: TransactionKind,
        wallet_id: WalletId,
        amount: Money,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        notes: Option<String>,
    ) -> FintrackResult<Transaction> {
        if kind == TransactionKind::Transfer {
            return Err(FintrackError::Validation(
                "Transfers are recorded through the transfer operation".into(),
            ));
        }

        let mut wallet = self
            .storage
            .wallets
            .get(wallet_id)?
            .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;

        if wallet.archived {
            return Err(FintrackError::Validation(
                "Cannot record transactions against an archived wallet".into(),
            ));
        }

        // Verify category exists if provided
        if let Some(cat_id) = category_id {
            self.storage
                .categories
                .get(cat_id)?
                .ok_or_else(|| FintrackError::category_not_found(cat_id.to_string()))?;
        }

        let mut txn = Transaction::new(kind, wallet_id, date, amount);
        txn.category_id = category_id;
        if let Some(notes) = notes {
            txn.notes = notes;
        }

        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        // Apply the balance effect
        match kind {
            TransactionKind::Income => wallet.deposit(amount),
            TransactionKind::Expense => wallet.withdraw(amount),
            TransactionKind::Transfer => unreachable!(),
        }

        // Two independent writes, in ledger-then-balance order
        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.wallets.upsert(wallet)?;
        self.storage.wallets.save()?;

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FintrackResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by ID string
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }
        Ok(None)
    }

    /// List transactions with optional filtering, newest first
    pub fn list(&self, filter: TransactionFilter) -> FintrackResult<Vec<Transaction>> {
        let mut transactions = if let Some(wallet_id) = filter.wallet_id {
            self.storage.transactions.get_by_wallet(wallet_id)?
        } else if let Some(category_id) = filter.category_id {
            self.storage.transactions.get_by_category(category_id)?
        } else {
            self.storage.transactions.get_all()?
        };

        if let Some(category_id) = filter.category_id {
            transactions.retain(|t| t.category_id == Some(category_id));
        }
        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Update a transaction's amount, date, category, or notes.
    ///
    /// The old balance effect is reversed and the new one applied on every
    /// wallet the entry touches.
    pub fn update(
        &self,
        id: TransactionId,
        amount: Option<Money>,
        date: Option<NaiveDate>,
        category_id: Option<CategoryId>,
        notes: Option<String>,
    ) -> FintrackResult<Transaction> {
        let old = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FintrackError::transaction_not_found(id.to_string()))?;

        let mut txn = old.clone();
        if let Some(amount) = amount {
            txn.amount = amount;
        }
        if let Some(date) = date {
            txn.date = date;
        }
        if let Some(category_id) = category_id {
            self.storage
                .categories
                .get(category_id)?
                .ok_or_else(|| FintrackError::category_not_found(category_id.to_string()))?;
            txn.category_id = Some(category_id);
        }
        if let Some(notes) = notes {
            txn.notes = notes;
        }
        txn.updated_at = chrono::Utc::now();

        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.reapply_balances(&old, Some(&txn))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        Ok(txn)
    }

    /// Delete a transaction, reversing its balance effect
    pub fn delete(&self, id: TransactionId) -> FintrackResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FintrackError::transaction_not_found(id.to_string()))?;

        self.reapply_balances(&txn, None)?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        Ok(txn)
    }

    /// Reverse `old`'s effect on every wallet it touches and apply `new`'s
    /// effect, persisting the wallet store once.
    fn reapply_balances(&self, old: &Transaction, new: Option<&Transaction>) -> FintrackResult<()> {
        let mut touched: Vec<WalletId> = vec![old.wallet_id];
        if let Some(to) = old.transfer_wallet_id {
            touched.push(to);
        }
        if let Some(new) = new {
            if !touched.contains(&new.wallet_id) {
                touched.push(new.wallet_id);
            }
            if let Some(to) = new.transfer_wallet_id {
                if !touched.contains(&to) {
                    touched.push(to);
                }
            }
        }

        for wallet_id in touched {
            let mut wallet = self
                .storage
                .wallets
                .get(wallet_id)?
                .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;

            wallet.deposit(-old.signed_amount_for(wallet_id));
            if let Some(new) = new {
                wallet.deposit(new.signed_amount_for(wallet_id));
            }

            self.storage.wallets.upsert(wallet)?;
        }

        self.storage.wallets.save()
    }
}
