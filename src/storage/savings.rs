//! Savings goal repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{SavingsGoal, SavingsGoalId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable savings goal data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SavingsGoalData {
    savings_goals: Vec<SavingsGoal>,
}

/// Repository for savings goal persistence
pub struct SavingsGoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<SavingsGoalId, SavingsGoal>>,
}

impl SavingsGoalRepository {
    /// Create a new savings goal repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load goals from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: SavingsGoalData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for goal in file_data.savings_goals {
            data.insert(goal.id, goal);
        }

        Ok(())
    }

    /// Save goals to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = SavingsGoalData {
            savings_goals: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a goal by ID
    pub fn get(&self, id: SavingsGoalId) -> Result<Option<SavingsGoal>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all goals, open ones first, then by name
    pub fn get_all(&self) -> Result<Vec<SavingsGoal>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.closed.cmp(&b.closed).then(a.name.cmp(&b.name)));
        Ok(goals)
    }

    /// Get all open (not closed) goals
    pub fn get_open(&self) -> Result<Vec<SavingsGoal>, FintrackError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|g| !g.closed).collect())
    }

    /// Get a goal by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<SavingsGoal>, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .find(|g| g.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a goal
    pub fn upsert(&self, goal: SavingsGoal) -> Result<(), FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(goal.id, goal);
        Ok(())
    }

    /// Delete a goal
    pub fn delete(&self, id: SavingsGoalId) -> Result<bool, FintrackError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count goals
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self
            .data
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
