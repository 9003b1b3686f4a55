//! Integrity checks
//!
//! The ledger mutations write two or three stores per action with no
//! cross-file transaction, so the invariants between them are convention.
//! `doctor` walks every store and reports where they have diverged.

use crate::error::FintrackResult;
use crate::models::{Money, Weight};
use crate::storage::Storage;

/// One detected inconsistency
#[derive(Debug, Clone)]
pub struct Issue {
    /// Short machine-style tag (e.g. "wallet_balance_drift")
    pub code: &'static str,
    /// Human-readable detail
    pub detail: String,
}

/// Result of a full integrity pass
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub issues: Vec<Issue>,
}

impl DoctorReport {
    /// Check whether the pass found nothing
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Service running the integrity pass
pub struct DoctorService<'a> {
    storage: &'a Storage,
}

impl<'a> DoctorService<'a> {
    /// Create a new doctor service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Run every check and collect the issues
    pub fn run(&self) -> FintrackResult<DoctorReport> {
        let mut report = DoctorReport::default();

        self.check_wallet_balances(&mut report)?;
        self.check_gold_weights(&mut report)?;
        self.check_liability_balances(&mut report)?;
        self.check_dangling_references(&mut report)?;

        Ok(report)
    }

    /// Wallet balance must equal opening balance plus the signed ledger sum
    fn check_wallet_balances(&self, report: &mut DoctorReport) -> FintrackResult<()> {
        let transactions = self.storage.transactions.get_all()?;

        for wallet in self.storage.wallets.get_all()? {
            let applied: Money = transactions
                .iter()
                .map(|t| t.signed_amount_for(wallet.id))
                .sum();
            let expected = wallet.opening_balance + applied;

            if expected != wallet.balance {
                report.issues.push(Issue {
                    code: "wallet_balance_drift",
                    detail: format!(
                        "Wallet '{}' holds {} but the ledger implies {}",
                        wallet.name, wallet.balance, expected
                    ),
                });
            }
        }

        Ok(())
    }

    /// Gold wallet weight must equal the signed sum of its gold ledger entries
    fn check_gold_weights(&self, report: &mut DoctorReport) -> FintrackResult<()> {
        let entries = self.storage.gold_transactions.get_all()?;

        for wallet in self.storage.gold_wallets.get_all()? {
            let expected: Weight = entries
                .iter()
                .map(|t| t.signed_weight_for(wallet.id))
                .sum();

            if expected != wallet.weight {
                report.issues.push(Issue {
                    code: "gold_weight_drift",
                    detail: format!(
                        "Gold wallet '{}' holds {} but the ledger implies {}",
                        wallet.name, wallet.weight, expected
                    ),
                });
            }
        }

        Ok(())
    }

    /// Liability balance must equal the original amount minus recorded payments
    fn check_liability_balances(&self, report: &mut DoctorReport) -> FintrackResult<()> {
        for liability in self.storage.liabilities.get_all()? {
            let paid: Money = self
                .storage
                .liabilities
                .get_payments(liability.id)?
                .iter()
                .map(|p| p.amount)
                .sum();

            let mut expected = liability.original_amount - paid;
            if expected.is_negative() {
                expected = Money::zero();
            }

            if expected != liability.balance {
                report.issues.push(Issue {
                    code: "liability_balance_drift",
                    detail: format!(
                        "Liability '{}' shows {} outstanding but payments imply {}",
                        liability.name, liability.balance, expected
                    ),
                });
            }
        }

        Ok(())
    }

    /// Entries must reference stores that still contain their targets
    fn check_dangling_references(&self, report: &mut DoctorReport) -> FintrackResult<()> {
        for txn in self.storage.transactions.get_all()? {
            if self.storage.wallets.get(txn.wallet_id)?.is_none() {
                report.issues.push(Issue {
                    code: "txn_missing_wallet",
                    detail: format!("Transaction {} references a deleted wallet", txn.id),
                });
            }
            if let Some(to) = txn.transfer_wallet_id {
                if self.storage.wallets.get(to)?.is_none() {
                    report.issues.push(Issue {
                        code: "txn_missing_wallet",
                        detail: format!(
                            "Transaction {} transfers to a deleted wallet",
                            txn.id
                        ),
                    });
                }
            }
            if let Some(category_id) = txn.category_id {
                if self.storage.categories.get(category_id)?.is_none() {
                    report.issues.push(Issue {
                        code: "txn_missing_category",
                        detail: format!("Transaction {} references a deleted category", txn.id),
                    });
                }
            }
        }

        for budget in self.storage.budgets.get_all()? {
            if self.storage.categories.get(budget.category_id)?.is_none() {
                report.issues.push(Issue {
                    code: "budget_missing_category",
                    detail: format!("Budget {} references a deleted category", budget.id),
                });
            }
        }

        for payment in self.storage.liabilities.get_all_payments()? {
            if self.storage.liabilities.get(payment.liability_id)?.is_none() {
                report.issues.push(Issue {
                    code: "payment_missing_liability",
                    detail: format!("Payment {} references a deleted liability", payment.id),
                });
            }
        }

        for txn in self.storage.gold_transactions.get_all()? {
            if self.storage.gold_wallets.get(txn.gold_wallet_id)?.is_none() {
                report.issues.push(Issue {
                    code: "gold_txn_missing_wallet",
                    detail: format!("Gold entry {} references a deleted gold wallet", txn.id),
                });
            }
        }

        Ok(())
    }
}
