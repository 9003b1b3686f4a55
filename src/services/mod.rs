//! Service layer for fintrack
//!
//! The service layer provides the ledger mutations on top of the storage
//! layer: every user action that moves money updates the affected stores
//! together and persists each one.

pub mod bill;
pub mod budget;
pub mod doctor;
pub mod gold;
pub mod liability;
pub mod price;
pub mod savings;
pub mod transaction;
pub mod transfer;
pub mod wallet;

pub use bill::BillService;
pub use budget::{BudgetService, BudgetStatus};
pub use doctor::{DoctorReport, DoctorService, Issue};
pub use gold::{GoldHolding, GoldService};
pub use liability::LiabilityService;
pub use price::GoldPriceService;
pub use savings::SavingsService;
pub use transaction::{TransactionFilter, TransactionService};
pub use transfer::TransferService;
pub use wallet::WalletService;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Wallet};

/// Reject a payment that would overdraw the wallet.
///
/// Plain expense recording is allowed to go negative (the ledger is a
/// record of what happened); payments the tool itself originates are not.
pub(crate) fn ensure_funds(wallet: &Wallet, needed: Money) -> FintrackResult<()> {
    if wallet.balance < needed {
        return Err(FintrackError::InsufficientFunds {
            wallet: wallet.name.clone(),
            needed: needed.cents(),
            available: wallet.balance.cents(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_funds() {
        let wallet = Wallet::with_balance("Cash", Money::from_cents(1000));
        assert!(ensure_funds(&wallet, Money::from_cents(1000)).is_ok());
        assert!(matches!(
            ensure_funds(&wallet, Money::from_cents(1001)),
            Err(FintrackError::InsufficientFunds { .. })
        ));
    }
}
