//! Spend repository for JSON storage
//!
//! Manages loading and saving the spend log to spends.json. Spends are
//! immutable: the repository inserts and deletes, it never updates.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::BuckwheatError;
use crate::models::{Spend, SpendId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SpendData {
    spends: Vec<Spend>,
}

/// Repository for the spend log with a per-day index
pub struct SpendRepository {
    path: PathBuf,
    data: RwLock<HashMap<SpendId, Spend>>,
    /// Index: calendar day -> spend ids
    by_date: RwLock<BTreeMap<NaiveDate, Vec<SpendId>>>,
}

fn newest_first(spends: &mut [Spend]) {
    spends.sort_by(|a, b| {
        b.recorded_at
            .cmp(&a.recorded_at)
            .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
    });
}

impl SpendRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_date: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load spends from disk and rebuild the index
    pub fn load(&self) -> Result<(), BuckwheatError> {
        let file_data: SpendData = read_json(&self.path)?;

        for spend in &file_data.spends {
            spend.validate().map_err(|e| {
                BuckwheatError::Storage(format!(
                    "Invalid spend {} in {}: {}",
                    spend.id,
                    self.path.display(),
                    e
                ))
            })?;
        }

        let mut data = self.data.write().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_date = self.by_date.write().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_date.clear();

        for spend in file_data.spends {
            by_date.entry(spend.date()).or_default().push(spend.id);
            data.insert(spend.id, spend);
        }

        tracing::debug!(count = data.len(), "loaded spends");
        Ok(())
    }

    pub fn save(&self) -> Result<(), BuckwheatError> {
        let data = self.data.read().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut spends: Vec<_> = data.values().cloned().collect();
        newest_first(&mut spends);

        write_json_atomic(&self.path, &SpendData { spends })
    }

    pub fn get(&self, id: SpendId) -> Result<Option<Spend>, BuckwheatError> {
        let data = self.data.read().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All spends, newest first
    pub fn get_all(&self) -> Result<Vec<Spend>, BuckwheatError> {
        let data = self.data.read().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut spends: Vec<_> = data.values().cloned().collect();
        newest_first(&mut spends);
        Ok(spends)
    }

    /// Spends dated in `[start, end]`, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Spend>, BuckwheatError> {
        if end < start {
            return Ok(Vec::new());
        }

        let data = self.data.read().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_date = self.by_date.read().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut spends: Vec<_> = by_date
            .range(start..=end)
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| data.get(id).cloned())
            .collect();
        newest_first(&mut spends);
        Ok(spends)
    }

    /// The spend entered last among those dated in `[start, end]`
    ///
    /// Entry order is the stored sequence, not the spend's own timestamp.
    /// Spends from files without a sequence fall back to `recorded_at`.
    pub fn last_entered_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Spend>, BuckwheatError> {
        Ok(self
            .get_by_date_range(start, end)?
            .into_iter()
            .max_by(|a, b| {
                a.sequence
                    .cmp(&b.sequence)
                    .then_with(|| a.recorded_at.cmp(&b.recorded_at))
                    .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
            }))
    }

    /// Resolve a user-typed short id such as `spd-1a2b3c4d`
    ///
    /// Ambiguous prefixes are rejected rather than guessed.
    pub fn find_by_short_id(&self, short: &str) -> Result<Option<Spend>, BuckwheatError> {
        let data = self.data.read().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut matches = data.values().filter(|s| s.id.matches_short(short));
        match (matches.next(), matches.next()) {
            (Some(spend), None) => Ok(Some(spend.clone())),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(BuckwheatError::Validation(format!(
                "'{}' matches more than one spend; use a longer id",
                short
            ))),
        }
    }

    /// Add a new spend and stamp its entry sequence; ids are never reused
    pub fn insert(&self, mut spend: Spend) -> Result<Spend, BuckwheatError> {
        let mut data = self.data.write().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_date = self.by_date.write().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.contains_key(&spend.id) {
            return Err(BuckwheatError::Storage(format!(
                "Spend {} already exists",
                spend.id
            )));
        }

        spend.sequence = data.values().map(|s| s.sequence).max().unwrap_or(0) + 1;

        by_date.entry(spend.date()).or_default().push(spend.id);
        data.insert(spend.id, spend.clone());
        Ok(spend)
    }

    /// Remove a spend, returning it if it existed
    pub fn delete(&self, id: SpendId) -> Result<Option<Spend>, BuckwheatError> {
        let mut data = self.data.write().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_date = self.by_date.write().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let Some(spend) = data.remove(&id) else {
            return Ok(None);
        };

        if let Some(ids) = by_date.get_mut(&spend.date()) {
            ids.retain(|&sid| sid != id);
            if ids.is_empty() {
                by_date.remove(&spend.date());
            }
        }
        Ok(Some(spend))
    }

    pub fn count(&self) -> Result<usize, BuckwheatError> {
        let data = self.data.read().map_err(|e| {
            BuckwheatError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn create_test_repo() -> (TempDir, SpendRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = SpendRepository::new(temp_dir.path().join("spends.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(repo.last_entered_between(day, day).unwrap().is_none());
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let spend = Spend::new(Money::from_cents(4250), at(3, 12));
        let id = spend.id;

        let stored = repo.insert(spend.clone()).unwrap();

        assert_eq!(stored.sequence, 1);
        assert_eq!(repo.get(id).unwrap(), Some(stored));
        assert!(repo.insert(spend).is_err());
    }

    #[test]
    fn test_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Spend::new(Money::from_major(1), at(2, 9))).unwrap();
        repo.insert(Spend::new(Money::from_major(2), at(4, 9))).unwrap();
        repo.insert(Spend::new(Money::from_major(3), at(3, 9))).unwrap();

        let amounts: Vec<_> = repo.get_all().unwrap().iter().map(|s| s.amount).collect();
        assert_eq!(
            amounts,
            vec![Money::from_major(2), Money::from_major(3), Money::from_major(1)]
        );
    }

    #[test]
    fn test_last_entered_follows_entry_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Spend::new(Money::from_major(77), at(5, 18))).unwrap();
        repo.insert(Spend::new(Money::from_major(11), at(5, 9))).unwrap();
        repo.insert(Spend::new(Money::from_major(40), at(20, 9))).unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        let last = repo.last_entered_between(day(1), day(10)).unwrap().unwrap();
        assert_eq!(last.amount, Money::from_major(11));

        let last = repo.last_entered_between(day(1), day(31)).unwrap().unwrap();
        assert_eq!(last.amount, Money::from_major(40));
        assert!(repo.last_entered_between(day(21), day(31)).unwrap().is_none());
    }

    #[test]
    fn test_sequence_survives_delete_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(Spend::new(Money::from_major(1), at(2, 9))).unwrap();
        let second = repo.insert(Spend::new(Money::from_major(2), at(2, 8))).unwrap();
        repo.delete(second.id).unwrap();
        let third = repo.insert(Spend::new(Money::from_major(3), at(2, 7))).unwrap();
        assert_eq!(third.sequence, 2);
        repo.save().unwrap();

        let reopened = SpendRepository::new(temp_dir.path().join("spends.json"));
        reopened.load().unwrap();
        let fourth = reopened
            .insert(Spend::new(Money::from_major(4), at(2, 6)))
            .unwrap();
        assert_eq!(fourth.sequence, 3);
    }

    #[test]
    fn test_load_rejects_invalid_spend() {
        let (temp_dir, repo) = create_test_repo();
        let path = temp_dir.path().join("spends.json");
        std::fs::write(
            &path,
            r#"{"spends":[{"id":"3f1c2d4e-5a6b-4c7d-8e9f-0a1b2c3d4e5f","amount":"-4","recorded_at":"2025-01-02T09:00:00"}]}"#,
        )
        .unwrap();

        assert!(matches!(repo.load(), Err(BuckwheatError::Storage(_))));
    }

    #[test]
    fn test_date_range_query() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Spend::new(Money::from_major(10), at(10, 8))).unwrap();
        repo.insert(Spend::new(Money::from_major(20), at(15, 8))).unwrap();
        repo.insert(Spend::new(Money::from_major(25), at(15, 20))).unwrap();
        repo.insert(Spend::new(Money::from_major(30), at(20, 8))).unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        let range = repo.get_by_date_range(day(12), day(18)).unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[0].amount, Money::from_major(25));
        assert!(repo.get_by_date_range(day(18), day(12)).unwrap().is_empty());
    }

    #[test]
    fn test_delete_updates_index() {
        let (_temp_dir, repo) = create_test_repo();
        let spend = Spend::new(Money::from_major(5), at(7, 9));
        let id = spend.id;
        repo.insert(spend).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());

        let day = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert!(repo.get_by_date_range(day, day).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let spend = Spend::new(Money::from_cents(999), at(3, 18));
        let id = spend.id;
        repo.insert(spend).unwrap();
        repo.save().unwrap();

        let reopened = SpendRepository::new(temp_dir.path().join("spends.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
        assert_eq!(reopened.get(id).unwrap().unwrap().amount, Money::from_cents(999));
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, repo) = create_test_repo();
        let spend = Spend::new(Money::from_major(5), at(7, 9));
        let short = spend.id.to_string();
        let stored = repo.insert(spend).unwrap();

        assert_eq!(repo.find_by_short_id(&short).unwrap(), Some(stored));
        assert!(repo.find_by_short_id("spd-zzzzzzzz").unwrap().is_none());
    }
}
