//! Liability repository for JSON storage
//!
//! Debts and their payment history live together in liabilities.json so a
//! restore or export always moves them as one unit.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{Liability, LiabilityId, LiabilityPayment, LiabilityPaymentId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable liability data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct LiabilityData {
    liabilities: Vec<Liability>,
    payments: Vec<LiabilityPayment>,
}

/// Repository for liabilities and their payments
pub struct LiabilityRepository {
    path: PathBuf,
    liabilities: RwLock<HashMap<LiabilityId, Liability>>,
    payments: RwLock<HashMap<LiabilityPaymentId, LiabilityPayment>>,
}

impl LiabilityRepository {
    /// Create a new liability repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            liabilities: RwLock::new(HashMap::new()),
            payments: RwLock::new(HashMap::new()),
        }
    }

    /// Load liabilities and payments from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: LiabilityData = read_json(&self.path)?;

        let mut liabilities = self
            .liabilities
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut payments = self
            .payments
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        liabilities.clear();
        for liability in file_data.liabilities {
            liabilities.insert(liability.id, liability);
        }

        payments.clear();
        for payment in file_data.payments {
            payments.insert(payment.id, payment);
        }

        Ok(())
    }

    /// Save liabilities and payments to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let liabilities = self
            .liabilities
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let payments = self
            .payments
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = LiabilityData {
            liabilities: liabilities.values().cloned().collect(),
            payments: payments.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a liability by ID
    pub fn get(&self, id: LiabilityId) -> Result<Option<Liability>, FintrackError> {
        let data = self
            .liabilities
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all liabilities, open ones first, largest balance first within each
    pub fn get_all(&self) -> Result<Vec<Liability>, FintrackError> {
        let data = self
            .liabilities
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut liabilities: Vec<_> = data.values().cloned().collect();
        liabilities.sort_by(|a, b| {
            a.is_settled()
                .cmp(&b.is_settled())
                .then(b.balance.cmp(&a.balance))
                .then(a.name.cmp(&b.name))
        });
        Ok(liabilities)
    }

    /// Get all open (not settled) liabilities
    pub fn get_open(&self) -> Result<Vec<Liability>, FintrackError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|l| !l.is_settled()).collect())
    }

    /// Get a liability by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Liability>, FintrackError> {
        let data = self
            .liabilities
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|l| l.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a liability
    pub fn upsert(&self, liability: Liability) -> Result<(), FintrackError> {
        let mut data = self
            .liabilities
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(liability.id, liability);
        Ok(())
    }

    /// Delete a liability and its payment history
    pub fn delete(&self, id: LiabilityId) -> Result<bool, FintrackError> {
        let mut liabilities = self
            .liabilities
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut payments = self
            .payments
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        payments.retain(|_, p| p.liability_id != id);
        Ok(liabilities.remove(&id).is_some())
    }

    /// Append a payment record
    pub fn add_payment(&self, payment: LiabilityPayment) -> Result<(), FintrackError> {
        let mut data = self
            .payments
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(payment.id, payment);
        Ok(())
    }

    /// Get the payment history for a liability, newest first
    pub fn get_payments(&self, id: LiabilityId) -> Result<Vec<LiabilityPayment>, FintrackError> {
        let data = self
            .payments
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut payments: Vec<_> = data
            .values()
            .filter(|p| p.liability_id == id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(payments)
    }

    /// Get every payment record, newest first
    pub fn get_all_payments(&self) -> Result<Vec<LiabilityPayment>, FintrackError> {
        let data = self
            .payments
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut payments: Vec<_> = data.values().cloned().collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(payments)
    }

    /// Count liabilities
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self
            .liabilities
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
