//! Wallet service
//!
//! Setting up and replacing the budget period, plus the whole-period views.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::budget::PeriodSummary;
use crate::error::{BuckwheatError, BuckwheatResult};
use crate::models::{Money, Spend, Wallet};
use crate::storage::Storage;

/// Audit id of the single wallet slot
const WALLET_ENTITY_ID: &str = "wallet";

/// Input for starting a new budget period
#[derive(Debug, Clone)]
pub struct SetWalletInput {
    pub finish_date: NaiveDate,
    pub total_budget: Money,
    /// Acknowledge that the current period already has spends
    pub confirm: bool,
}

/// Service for the budget period
pub struct WalletService<'a> {
    storage: &'a Storage,
}

impl<'a> WalletService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The wallet, if one has been set up
    pub fn get(&self) -> BuckwheatResult<Option<Wallet>> {
        self.storage.budget.wallet()
    }

    /// The wallet, or [`BuckwheatError::NoWallet`]
    pub fn current(&self) -> BuckwheatResult<Wallet> {
        self.get()?.ok_or(BuckwheatError::NoWallet)
    }

    /// Spends that belong to `wallet`'s period, newest first
    pub fn spends_in(&self, wallet: &Wallet) -> BuckwheatResult<Vec<Spend>> {
        self.storage
            .spends
            .get_by_date_range(wallet.start_date(), wallet.finish_date())
    }

    /// Start a new period today
    ///
    /// The new wallet always starts on `today`. Replacing a wallet whose
    /// period already has spends needs `confirm`. The old spends and the day
    /// checkpoint are discarded, so the new period starts with its full budget.
    pub fn set(&self, input: SetWalletInput, today: NaiveDate) -> BuckwheatResult<Wallet> {
        if !input.total_budget.is_positive() {
            return Err(BuckwheatError::Validation(format!(
                "Budget must be greater than zero, got {}",
                input.total_budget
            )));
        }
        if input.finish_date < today {
            return Err(BuckwheatError::Validation(format!(
                "Finish date {} is before today ({})",
                input.finish_date, today
            )));
        }

        let previous = self.get()?;
        if let Some(old) = &previous {
            let spends = self.spends_in(old)?.len();
            if spends > 0 && !input.confirm {
                return Err(BuckwheatError::ConfirmationRequired { spends });
            }
        }

        let wallet = Wallet::new(today, input.finish_date, input.total_budget)
            .map_err(|e| BuckwheatError::Validation(e.to_string()))?;

        self.storage.budget.replace_wallet(wallet.clone())?;
        self.storage.budget.save()?;
        let cleared = self.clear_spends()?;

        let name = Some(wallet.to_string());
        match &previous {
            Some(old) => {
                self.storage
                    .log_update(EntityType::Wallet, WALLET_ENTITY_ID, name, old, &wallet)?
            }
            None => self
                .storage
                .log_create(EntityType::Wallet, WALLET_ENTITY_ID, name, &wallet)?,
        }

        tracing::info!(
            start = %wallet.start_date(),
            finish = %wallet.finish_date(),
            budget = %wallet.total_budget(),
            days = wallet.day_count(),
            replaced = previous.is_some(),
            cleared,
            "wallet set"
        );
        Ok(wallet)
    }

    /// Delete every stored spend, auditing each one
    fn clear_spends(&self) -> BuckwheatResult<usize> {
        let spends = self.storage.spends.get_all()?;
        if spends.is_empty() {
            return Ok(0);
        }

        for spend in &spends {
            self.storage.spends.delete(spend.id)?;
        }
        self.storage.spends.save()?;

        for spend in &spends {
            self.storage
                .log_delete(EntityType::Spend, spend.id.to_string(), None, spend)?;
        }
        Ok(spends.len())
    }

    /// Budget minus everything spent in the period so far
    pub fn rest_budget(&self) -> BuckwheatResult<Money> {
        let wallet = self.current()?;
        let spent: Money = self.spends_in(&wallet)?.iter().map(|s| s.amount).sum();
        Ok(wallet.total_budget() - spent)
    }

    /// Whole-period statistics as of `today`
    pub fn summary(&self, today: NaiveDate) -> BuckwheatResult<PeriodSummary> {
        let wallet = self.current()?;
        let spends = self.spends_in(&wallet)?;
        Ok(PeriodSummary::build(&wallet, &spends, today))
    }
}
