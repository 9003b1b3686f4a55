//! Custom error types for fintrack
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Weight;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FintrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Budget-related errors
    #[error("Budget error: {0}")]
    Budget(String),

    /// Insufficient cash in a wallet
    #[error("Insufficient funds in wallet '{wallet}': need {needed}, have {available}")]
    InsufficientFunds {
        wallet: String,
        needed: i64,
        available: i64,
    },

    /// Insufficient gold in a gold wallet
    #[error("Insufficient gold in '{wallet}': need {needed}, have {available}")]
    InsufficientGold {
        wallet: String,
        needed: Weight,
        available: Weight,
    },

    /// Gold price errors (no cached quote, fetch failure)
    #[error("Price error: {0}")]
    Price(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Backup/restore errors
    #[error("Backup error: {0}")]
    Backup(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FintrackError {
    /// Create a "not found" error for wallets
    pub fn wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for gold wallets
    pub fn gold_wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Gold wallet",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Savings goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bills
    pub fn bill_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bill",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for liabilities
    pub fn liability_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Liability",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FintrackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FintrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FintrackResult<T> = Result<T, FintrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FintrackError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FintrackError::wallet_not_found("Cash");
        assert_eq!(err.to_string(), "Wallet not found: Cash");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = FintrackError::InsufficientFunds {
            wallet: "Cash".into(),
            needed: 5000,
            available: 3000,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in wallet 'Cash': need 5000, have 3000"
        );
    }

    #[test]
    fn test_insufficient_gold_error() {
        let err = FintrackError::InsufficientGold {
            wallet: "Vault".into(),
            needed: Weight::from_milligrams(10_000),
            available: Weight::from_milligrams(5_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient gold in 'Vault': need 10.000 g, have 5.000 g"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let fintrack_err: FintrackError = io_err.into();
        assert!(matches!(fintrack_err, FintrackError::Io(_)));
    }
}
