//! Bill service
//!
//! Paying a bill debits the wallet, appends an expense entry carrying the
//! bill's category, and settles the reminder: one-shot bills flip to paid,
//! recurring bills roll their due date forward one cycle.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    BillId, BillReminder, CategoryId, Money, Period, Transaction, TransactionKind, WalletId,
};
use crate::storage::Storage;

use super::ensure_funds;

/// Service for bill reminders
pub struct BillService<'a> {
    storage: &'a Storage,
}

impl<'a> BillService<'a> {
    /// Create a new bill service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a bill
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &self,
        name: &str,
        amount: Money,
        due_date: NaiveDate,
        recurrence: Option<Period>,
        wallet_id: Option<WalletId>,
        category_id: Option<CategoryId>,
        notes: Option<String>,
    ) -> FintrackResult<BillReminder> {
        if let Some(wallet_id) = wallet_id {
            self.storage
                .wallets
                .get(wallet_id)?
                .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;
        }
        if let Some(category_id) = category_id {
            self.storage
                .categories
                .get(category_id)?
                .ok_or_else(|| FintrackError::category_not_found(category_id.to_string()))?;
        }

        let mut bill = BillReminder::new(name, amount, due_date);
        bill.recurrence = recurrence;
        bill.wallet_id = wallet_id;
        bill.category_id = category_id;
        if let Some(notes) = notes {
            bill.notes = notes;
        }

        bill.validate().map_err(FintrackError::Validation)?;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;

        Ok(bill)
    }

    /// Find a bill by ID string or name
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<BillReminder>> {
        if let Ok(id) = identifier.parse::<BillId>() {
            if let Some(bill) = self.storage.bills.get(id)? {
                return Ok(Some(bill));
            }
        }
        self.storage.bills.get_by_name(identifier)
    }

    /// Find a bill or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FintrackResult<BillReminder> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::bill_not_found(identifier))
    }

    /// Pay one cycle of a bill from a wallet.
    ///
    /// The wallet given here (or the bill's default wallet) is debited, an
    /// expense entry is appended, and the reminder is settled.
    pub fn pay(
        &self,
        bill_id: BillId,
        wallet_id: Option<WalletId>,
        date: NaiveDate,
    ) -> FintrackResult<(BillReminder, Transaction)> {
        let mut bill = self
            .storage
            .bills
            .get(bill_id)?
            .ok_or_else(|| FintrackError::bill_not_found(bill_id.to_string()))?;

        if bill.paid {
            return Err(FintrackError::Validation(format!(
                "Bill '{}' is already paid",
                bill.name
            )));
        }

        let wallet_id = wallet_id.or(bill.wallet_id).ok_or_else(|| {
            FintrackError::Validation(format!(
                "Bill '{}' has no wallet; pass one to pay from",
                bill.name
            ))
        })?;

        let mut wallet = self
            .storage
            .wallets
            .get(wallet_id)?
            .ok_or_else(|| FintrackError::wallet_not_found(wallet_id.to_string()))?;

        ensure_funds(&wallet, bill.amount)?;

        wallet.withdraw(bill.amount);

        let mut txn = Transaction::new(TransactionKind::Expense, wallet_id, date, bill.amount)
            .with_notes(format!("Bill: {}", bill.name));
        txn.category_id = bill.category_id;

        bill.settle();

        // Three independent writes
        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;
        self.storage.wallets.upsert(wallet)?;
        self.storage.wallets.save()?;

        Ok((bill, txn))
    }

    /// Remove a bill
    pub fn remove(&self, bill_id: BillId) -> FintrackResult<()> {
        if !self.storage.bills.delete(bill_id)? {
            return Err(FintrackError::bill_not_found(bill_id.to_string()));
        }
        self.storage.bills.save()
    }

    /// List all bills
    pub fn list(&self) -> FintrackResult<Vec<BillReminder>> {
        self.storage.bills.get_all()
    }

    /// Unpaid bills due within `days` of `today`, including overdue ones
    pub fn due_within(&self, today: NaiveDate, days: i64) -> FintrackResult<Vec<BillReminder>> {
        let cutoff = today + chrono::Duration::days(days);
        self.storage.bills.get_due_by(cutoff)
    }

    /// Unpaid bills already past due as of `today`
    pub fn overdue(&self, today: NaiveDate) -> FintrackResult<Vec<BillReminder>> {
        let all = self.storage.bills.get_unpaid()?;
        Ok(all.into_iter().filter(|b| b.is_overdue(today)).collect())
    }
}
