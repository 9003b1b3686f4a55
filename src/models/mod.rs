//! Core data models for fintrack
//!
//! This module contains all the data structures that represent the tracker
//! domain: wallets, transactions, categories, budgets, gold holdings, bills,
//! liabilities, and savings goals.

pub mod bill;
pub mod budget;
pub mod category;
pub mod gold;
pub mod ids;
pub mod liability;
pub mod money;
pub mod period;
pub mod savings;
pub mod transaction;
pub mod wallet;
pub mod weight;

pub use bill::BillReminder;
pub use budget::Budget;
pub use category::{Category, CategoryKind};
pub use gold::{GoldPriceQuote, GoldPurity, GoldTransaction, GoldTransactionKind, GoldWallet};
pub use ids::{
    BillId, BudgetId, CategoryId, GoldTransactionId, GoldWalletId, LiabilityId, LiabilityPaymentId,
    SavingsGoalId, TransactionId, WalletId,
};
pub use liability::{Liability, LiabilityPayment};
pub use money::Money;
pub use period::Period;
pub use savings::SavingsGoal;
pub use transaction::{Transaction, TransactionKind};
pub use wallet::Wallet;
pub use weight::Weight;
