//! Daily allowance service
//!
//! Loads the wallet, spend log and checkpoint, runs the calculator and
//! persists the checkpoint it hands back.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::budget::{compute_allowance, AllowanceOutcome, AllowanceRequest};
use crate::error::{BuckwheatError, BuckwheatResult};
use crate::models::{DistributionChoice, RedistributionMethod, Wallet};
use crate::storage::Storage;

const CHECKPOINT_ENTITY_ID: &str = "checkpoint";

/// A calculation together with the wallet it was made for
#[derive(Debug, Clone)]
pub struct DailyView {
    pub wallet: Wallet,
    pub as_of: NaiveDate,
    pub outcome: AllowanceOutcome,
}

/// Service computing today's allowance
pub struct DailyService<'a> {
    storage: &'a Storage,
}

impl<'a> DailyService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Compute the allowance for `today`
    ///
    /// `choice` answers a pending decision under [`RedistributionMethod::Ask`]
    /// and overrides the method for this crossing only. A changed checkpoint
    /// is saved before returning, so a second call on the same day reuses it.
    pub fn calculate(
        &self,
        method: RedistributionMethod,
        choice: Option<DistributionChoice>,
        today: NaiveDate,
    ) -> BuckwheatResult<DailyView> {
        let budget = self.storage.budget.snapshot()?;
        let wallet = budget.wallet.ok_or(BuckwheatError::NoWallet)?;
        let spends = self
            .storage
            .spends
            .get_by_date_range(wallet.start_date(), wallet.finish_date())?;

        let outcome = compute_allowance(&AllowanceRequest {
            wallet: &wallet,
            spends: &spends,
            method,
            choice,
            checkpoint: budget.checkpoint,
            as_of: today,
        });

        if let AllowanceOutcome::Ready(report) = &outcome {
            if let Some(applied) = &report.redistribution {
                tracing::info!(
                    choice = %applied.choice,
                    leftover = %applied.leftover,
                    from = %applied.from_date,
                    allowance = %report.today.allowance_at_start,
                    "leftover redistributed"
                );
            }

            if report.checkpoint_changed {
                self.storage.budget.set_checkpoint(report.checkpoint)?;
                self.storage.budget.save()?;

                let name = Some(report.checkpoint.date.to_string());
                match &budget.checkpoint {
                    Some(previous) => self.storage.log_update(
                        EntityType::Checkpoint,
                        CHECKPOINT_ENTITY_ID,
                        name,
                        previous,
                        &report.checkpoint,
                    )?,
                    None => self.storage.log_create(
                        EntityType::Checkpoint,
                        CHECKPOINT_ENTITY_ID,
                        name,
                        &report.checkpoint,
                    )?,
                }
            }
        } else {
            tracing::debug!(?outcome, "no allowance for today");
        }

        Ok(DailyView {
            wallet,
            as_of: today,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BuckwheatPaths;
    use crate::models::{Money, Spend};
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage
            .budget
            .replace_wallet(Wallet::new(day(1), day(10), Money::from_major(3000)).unwrap())
            .unwrap();
        (temp_dir, storage)
    }

    fn spend(storage: &Storage, d: u32, major: i64) {
        storage
            .spends
            .insert(Spend::new(
                Money::from_major(major),
                day(d).and_hms_opt(12, 0, 0).unwrap(),
            ))
            .unwrap();
    }

    #[test]
    fn test_first_calculation_writes_checkpoint() {
        let (temp_dir, storage) = create_test_storage();
        let service = DailyService::new(&storage);

        let view = service
            .calculate(RedistributionMethod::Ask, None, day(1))
            .unwrap();
        assert_eq!(view.outcome.remaining_today(), Money::from_major(300));

        let checkpoint = storage.budget.checkpoint().unwrap().unwrap();
        assert_eq!(checkpoint.date, day(1));

        // Persisted, not just in memory
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.budget.checkpoint().unwrap(), Some(checkpoint));
    }

    #[test]
    fn test_ask_then_choose() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DailyService::new(&storage);
        service
            .calculate(RedistributionMethod::Ask, None, day(1))
            .unwrap();
        spend(&storage, 1, 250);

        let pending = service
            .calculate(RedistributionMethod::Ask, None, day(2))
            .unwrap();
        assert!(matches!(
            pending.outcome,
            AllowanceOutcome::DecisionRequired { .. }
        ));
        assert_eq!(storage.budget.checkpoint().unwrap().unwrap().date, day(1));

        let chosen = service
            .calculate(
                RedistributionMethod::Ask,
                Some(DistributionChoice::AddToday),
                day(2),
            )
            .unwrap();
        assert_eq!(chosen.outcome.remaining_today(), Money::from_major(350));

        // Decided once; the same day no longer asks
        let again = service
            .calculate(RedistributionMethod::Ask, None, day(2))
            .unwrap();
        assert_eq!(again.outcome.remaining_today(), Money::from_major(350));

        let checkpoint_entries = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .filter(|e| e.entity_type == EntityType::Checkpoint)
            .count();
        assert_eq!(checkpoint_entries, 2);
    }

    #[test]
    fn test_finished_period() {
        let (_temp_dir, storage) = create_test_storage();
        spend(&storage, 4, 1000);

        let view = DailyService::new(&storage)
            .calculate(RedistributionMethod::Rest, None, day(15))
            .unwrap();
        assert_eq!(
            view.outcome,
            AllowanceOutcome::Finished {
                finished_on: day(10),
                rest_budget: Money::from_major(2000),
            }
        );
        assert!(storage.budget.checkpoint().unwrap().is_none());
    }

    #[test]
    fn test_no_wallet() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let err = DailyService::new(&storage)
            .calculate(RedistributionMethod::Rest, None, day(1))
            .unwrap_err();
        assert!(matches!(err, BuckwheatError::NoWallet));
    }
}
