//! Budget period ("wallet")
//!
//! A wallet is the date range and total amount the user commits to. It is
//! created or replaced wholesale and never partially mutated.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Money, MAX_AMOUNT};

/// The committed budget for a date range (both ends inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    start_date: NaiveDate,
    finish_date: NaiveDate,
    total_budget: Money,
}

impl Wallet {
    /// Create a wallet, validating the date range and budget
    pub fn new(
        start_date: NaiveDate,
        finish_date: NaiveDate,
        total_budget: Money,
    ) -> Result<Self, WalletValidationError> {
        let wallet = Self {
            start_date,
            finish_date,
            total_budget,
        };
        wallet.validate()?;
        Ok(wallet)
    }

    /// Re-check invariants (used after loading from disk)
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.finish_date < self.start_date {
            return Err(WalletValidationError::FinishBeforeStart {
                start: self.start_date,
                finish: self.finish_date,
            });
        }
        if self.total_budget.is_negative() {
            return Err(WalletValidationError::NegativeBudget(self.total_budget));
        }
        if self.total_budget.exceeds_limit() {
            return Err(WalletValidationError::BudgetTooLarge(self.total_budget));
        }
        Ok(())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn finish_date(&self) -> NaiveDate {
        self.finish_date
    }

    pub fn total_budget(&self) -> Money {
        self.total_budget
    }

    /// Number of days in the period, counting both ends
    pub fn day_count(&self) -> u32 {
        ((self.finish_date - self.start_date).num_days() + 1) as u32
    }

    /// Check if a date falls within the period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.finish_date
    }

    /// Whether the period is over as of `date`
    pub fn is_finished(&self, date: NaiveDate) -> bool {
        date > self.finish_date
    }

    /// Days left including `as_of` itself; 0 once the period has ended
    ///
    /// Before the period starts the full day count is returned.
    pub fn days_remaining(&self, as_of: NaiveDate) -> u32 {
        if self.is_finished(as_of) {
            return 0;
        }
        let from = as_of.max(self.start_date);
        ((self.finish_date - from).num_days() + 1) as u32
    }

    /// Iterate every date of the period
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.day_count() as i64).map(move |i| self.start_date + Duration::days(i))
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} over {}..{}",
            self.total_budget,
            self.start_date.format("%Y-%m-%d"),
            self.finish_date.format("%Y-%m-%d")
        )
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    FinishBeforeStart { start: NaiveDate, finish: NaiveDate },
    NegativeBudget(Money),
    BudgetTooLarge(Money),
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FinishBeforeStart { start, finish } => {
                write!(f, "Finish date {} is before start date {}", finish, start)
            }
            Self::NegativeBudget(amount) => write!(f, "Budget cannot be negative: {}", amount),
            Self::BudgetTooLarge(amount) => {
                write!(f, "Budget {} is above the limit of {}", amount, MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for WalletValidationError {}
