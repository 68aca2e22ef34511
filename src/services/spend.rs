//! Spend service
//!
//! Recording and removing spends. A spend is never edited; a mistake is
//! fixed by deleting it and recording a new one.

use chrono::NaiveDateTime;

use crate::audit::EntityType;
use crate::error::{BuckwheatError, BuckwheatResult};
use crate::models::{Money, Spend};
use crate::storage::Storage;

/// Service for the spend log
pub struct SpendService<'a> {
    storage: &'a Storage,
}

impl<'a> SpendService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a spend at `recorded_at`
    ///
    /// The date must fall inside the current wallet's period.
    pub fn add(&self, amount: Money, recorded_at: NaiveDateTime) -> BuckwheatResult<Spend> {
        let wallet = self
            .storage
            .budget
            .wallet()?
            .ok_or(BuckwheatError::NoWallet)?;

        let spend = Spend::new(amount, recorded_at);
        spend
            .validate()
            .map_err(|e| BuckwheatError::Validation(e.to_string()))?;

        let date = spend.date();
        if date < wallet.start_date() {
            return Err(BuckwheatError::Budget(format!(
                "The budget period starts on {}",
                wallet.start_date()
            )));
        }
        if wallet.is_finished(date) {
            return Err(BuckwheatError::Budget(format!(
                "The budget period ended on {}; set up a new budget first",
                wallet.finish_date()
            )));
        }

        let spend = self.storage.spends.insert(spend)?;
        self.storage.spends.save()?;
        self.storage
            .log_create(EntityType::Spend, spend.id.to_string(), None, &spend)?;

        tracing::info!(id = %spend.id, amount = %spend.amount, date = %date, "spend recorded");
        Ok(spend)
    }

    /// Delete a spend by its short id (`spd-1a2b3c4d`)
    pub fn delete(&self, short_id: &str) -> BuckwheatResult<Spend> {
        let spend = self
            .storage
            .spends
            .find_by_short_id(short_id)?
            .ok_or_else(|| BuckwheatError::spend_not_found(short_id))?;

        self.remove(spend)
    }

    /// Delete the spend of the current period that was entered last
    pub fn undo_last(&self) -> BuckwheatResult<Spend> {
        let wallet = self
            .storage
            .budget
            .wallet()?
            .ok_or(BuckwheatError::NoWallet)?;

        let spend = self
            .storage
            .spends
            .last_entered_between(wallet.start_date(), wallet.finish_date())?
            .ok_or_else(|| BuckwheatError::Validation("There is no spend to undo".into()))?;

        self.remove(spend)
    }

    fn remove(&self, spend: Spend) -> BuckwheatResult<Spend> {
        self.storage
            .spends
            .delete(spend.id)?
            .ok_or_else(|| BuckwheatError::spend_not_found(spend.id.to_string()))?;
        self.storage.spends.save()?;
        self.storage
            .log_delete(EntityType::Spend, spend.id.to_string(), None, &spend)?;

        tracing::info!(id = %spend.id, amount = %spend.amount, "spend deleted");
        Ok(spend)
    }

    /// Spends of the current period, newest first, optionally truncated
    pub fn history(&self, limit: Option<usize>) -> BuckwheatResult<Vec<Spend>> {
        let wallet = self
            .storage
            .budget
            .wallet()?
            .ok_or(BuckwheatError::NoWallet)?;

        let mut spends = self
            .storage
            .spends
            .get_by_date_range(wallet.start_date(), wallet.finish_date())?;
        if let Some(limit) = limit {
            spends.truncate(limit);
        }
        Ok(spends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BuckwheatPaths;
    use crate::models::Wallet;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        storage
            .budget
            .replace_wallet(Wallet::new(day(1), day(10), Money::from_major(3000)).unwrap())
            .unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_spend() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SpendService::new(&storage);

        let spend = service.add(Money::from_cents(1999), at(2, 13)).unwrap();

        assert_eq!(storage.spends.count().unwrap(), 1);
        assert_eq!(storage.spends.get(spend.id).unwrap(), Some(spend));
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_add_rejects_bad_amounts_and_dates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SpendService::new(&storage);

        assert!(service
            .add(Money::zero(), at(2, 13))
            .unwrap_err()
            .is_validation());
        assert!(matches!(
            service.add(Money::from_major(5), at(11, 9)),
            Err(BuckwheatError::Budget(_))
        ));
        assert_eq!(storage.spends.count().unwrap(), 0);
    }

    #[test]
    fn test_add_without_wallet() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let err = SpendService::new(&storage)
            .add(Money::from_major(5), at(2, 9))
            .unwrap_err();
        assert!(matches!(err, BuckwheatError::NoWallet));
    }

    #[test]
    fn test_delete_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SpendService::new(&storage);
        let spend = service.add(Money::from_major(40), at(3, 8)).unwrap();

        let deleted = service.delete(&spend.id.to_string()).unwrap();
        assert_eq!(deleted.id, spend.id);
        assert_eq!(storage.spends.count().unwrap(), 0);

        assert!(service.delete(&spend.id.to_string()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_undo_last() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SpendService::new(&storage);
        service.add(Money::from_major(10), at(2, 8)).unwrap();
        let last = service.add(Money::from_major(20), at(2, 9)).unwrap();

        assert_eq!(service.undo_last().unwrap().id, last.id);
        assert_eq!(service.history(None).unwrap().len(), 1);

        service.undo_last().unwrap();
        assert!(service.undo_last().unwrap_err().is_validation());
    }

    #[test]
    fn test_undo_removes_spend_entered_last() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SpendService::new(&storage);
        let evening = service.add(Money::from_major(77), at(2, 18)).unwrap();
        let morning = service.add(Money::from_major(11), at(2, 9)).unwrap();

        assert_eq!(service.undo_last().unwrap().id, morning.id);
        assert_eq!(service.undo_last().unwrap().id, evening.id);
    }

    #[test]
    fn test_undo_ignores_other_periods() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .spends
            .insert(Spend::new(
                Money::from_major(5),
                NaiveDate::from_ymd_opt(2024, 12, 20)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            ))
            .unwrap();

        let service = SpendService::new(&storage);
        assert!(service.undo_last().unwrap_err().is_validation());
        assert_eq!(storage.spends.count().unwrap(), 1);
    }

    #[test]
    fn test_add_rejects_oversized_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SpendService::new(&storage);
        let huge = Money::parse("50000000000000000000000000000").unwrap();

        assert!(service.add(huge, at(2, 9)).unwrap_err().is_validation());
        assert!(service.add(huge, at(2, 10)).unwrap_err().is_validation());
        assert_eq!(storage.spends.count().unwrap(), 0);
        assert!(storage.audit().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_history_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SpendService::new(&storage);
        for h in 8..12 {
            service.add(Money::from_major(1), at(4, h)).unwrap();
        }

        let history = service.history(Some(2)).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].recorded_at, at(4, 11));
    }
}
