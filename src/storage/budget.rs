//! Wallet repository for JSON storage
//!
//! The wallet and the day checkpoint share budget.json: the checkpoint only
//! has meaning for the wallet it was written under, so they are replaced
//! together.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BuckwheatError;
use crate::models::{DayCheckpoint, Wallet};

use super::file_io::{read_json, write_json_atomic};

/// Serialized shape of budget.json
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BudgetData {
    #[serde(default)]
    pub wallet: Option<Wallet>,
    /// Last day a redistribution decision was applied
    #[serde(default)]
    pub checkpoint: Option<DayCheckpoint>,
}

/// Repository for the wallet and its checkpoint
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<BudgetData>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BudgetData::default()),
        }
    }

    /// Load from disk, rejecting a wallet whose invariants do not hold
    pub fn load(&self) -> Result<(), BuckwheatError> {
        let file_data: BudgetData = read_json(&self.path)?;

        if let Some(wallet) = &file_data.wallet {
            wallet.validate().map_err(|e| {
                BuckwheatError::Storage(format!("Invalid wallet in {}: {}", self.path.display(), e))
            })?;
        }

        let mut data = self
            .data
            .write()
            .map_err(|e| BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), BuckwheatError> {
        let data = self
            .data
            .read()
            .map_err(|e| BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    /// Copy of the whole document
    pub fn snapshot(&self) -> Result<BudgetData, BuckwheatError> {
        let data = self
            .data
            .read()
            .map_err(|e| BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    pub fn wallet(&self) -> Result<Option<Wallet>, BuckwheatError> {
        Ok(self.snapshot()?.wallet)
    }

    pub fn checkpoint(&self) -> Result<Option<DayCheckpoint>, BuckwheatError> {
        Ok(self.snapshot()?.checkpoint)
    }

    /// Replace the wallet; the old checkpoint is discarded with it
    ///
    /// Returns the previous wallet.
    pub fn replace_wallet(&self, wallet: Wallet) -> Result<Option<Wallet>, BuckwheatError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.checkpoint = None;
        Ok(data.wallet.replace(wallet))
    }

    pub fn set_checkpoint(&self, checkpoint: DayCheckpoint) -> Result<(), BuckwheatError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.checkpoint = Some(checkpoint);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_repo() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert!(repo.wallet().unwrap().is_none());
        assert!(repo.checkpoint().unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let wallet = Wallet::new(day(1), day(10), Money::from_major(3000)).unwrap();
        repo.replace_wallet(wallet.clone()).unwrap();
        repo.set_checkpoint(DayCheckpoint {
            date: day(1),
            allowance_at_start: Money::from_major(300),
        })
        .unwrap();
        repo.save().unwrap();

        let reopened = BudgetRepository::new(temp_dir.path().join("budget.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.wallet().unwrap(), Some(wallet));
        assert_eq!(reopened.checkpoint().unwrap().unwrap().date, day(1));
    }

    #[test]
    fn test_replacing_wallet_clears_checkpoint() {
        let (_temp_dir, repo) = create_test_repo();
        let first = Wallet::new(day(1), day(10), Money::from_major(3000)).unwrap();
        repo.replace_wallet(first.clone()).unwrap();
        repo.set_checkpoint(DayCheckpoint {
            date: day(2),
            allowance_at_start: Money::from_major(300),
        })
        .unwrap();

        let second = Wallet::new(day(5), day(20), Money::from_major(1600)).unwrap();
        let previous = repo.replace_wallet(second).unwrap();

        assert_eq!(previous, Some(first));
        assert!(repo.checkpoint().unwrap().is_none());
    }

    #[test]
    fn test_invalid_wallet_on_disk_is_rejected() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("budget.json"),
            r#"{"wallet": {"start_date": "2025-01-10", "finish_date": "2025-01-01", "total_budget": "100"}}"#,
        )
        .unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, BuckwheatError::Storage(_)));
    }
}
