//! Bill reminder repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::FintrackError;
use crate::models::{BillId, BillReminder};

use super::file_io::{read_json, write_json_atomic};

/// Serializable bill data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BillData {
    bills: Vec<BillReminder>,
}

/// Repository for bill persistence
pub struct BillRepository {
    path: PathBuf,
    data: RwLock<HashMap<BillId, BillReminder>>,
}

impl BillRepository {
    /// Create a new bill repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load bills from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: BillData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for bill in file_data.bills {
            data.insert(bill.id, bill);
        }

        Ok(())
    }

    /// Save bills to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = BillData {
            bills: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a bill by ID
    pub fn get(&self, id: BillId) -> Result<Option<BillReminder>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all bills, soonest due first
    pub fn get_all(&self) -> Result<Vec<BillReminder>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut bills: Vec<_> = data.values().cloned().collect();
        bills.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.name.cmp(&b.name)));
        Ok(bills)
    }

    /// Get unpaid bills due on or before `cutoff`, soonest first
    pub fn get_due_by(&self, cutoff: NaiveDate) -> Result<Vec<BillReminder>, FintrackError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|b| !b.paid && b.due_date <= cutoff)
            .collect())
    }

    /// Get all unpaid bills
    pub fn get_unpaid(&self) -> Result<Vec<BillReminder>, FintrackError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|b| !b.paid).collect())
    }

    /// Get a bill by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<BillReminder>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|b| b.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a bill
    pub fn upsert(&self, bill: BillReminder) -> Result<(), FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(bill.id, bill);
        Ok(())
    }

    /// Delete a bill
    pub fn delete(&self, id: BillId) -> Result<bool, FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count bills
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_due_by_filters_paid_and_future() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BillRepository::new(temp_dir.path().join("bills.json"));
        repo.load().unwrap();

        repo.upsert(BillReminder::new("Rent", Money::from_cents(80_000), d(2025, 1, 1)))
            .unwrap();
        repo.upsert(BillReminder::new("Internet", Money::from_cents(4_000), d(2025, 2, 1)))
            .unwrap();
        let mut paid = BillReminder::new("Car tax", Money::from_cents(12_000), d(2025, 1, 1));
        paid.settle();
        repo.upsert(paid).unwrap();

        let due = repo.get_due_by(d(2025, 1, 15)).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].name, "Rent");
    }

    #[test]
    fn test_sorted_by_due_date() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BillRepository::new(temp_dir.path().join("bills.json"));
        repo.load().unwrap();

        repo.upsert(BillReminder::new("Later", Money::from_cents(100), d(2025, 3, 1)))
            .unwrap();
        repo.upsert(BillReminder::new("Sooner", Money::from_cents(100), d(2025, 1, 1)))
            .unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].name, "Sooner");
    }
}
