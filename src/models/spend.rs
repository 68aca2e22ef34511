//! Spend model
//!
//! A spend is an immutable fact: an amount taken out of the budget at a given
//! moment. Spends are never edited, only removed by an explicit delete.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SpendId;
use super::money::{Money, MAX_AMOUNT};

/// A recorded spend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spend {
    /// Unique identifier
    pub id: SpendId,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Local wall-clock time the spend was recorded
    pub recorded_at: NaiveDateTime,

    /// Position in entry order, assigned when the spend is stored
    #[serde(default)]
    pub sequence: u64,
}

impl Spend {
    /// Create a new spend with a fresh ID
    pub fn new(amount: Money, recorded_at: NaiveDateTime) -> Self {
        Self {
            id: SpendId::new(),
            amount,
            recorded_at,
            sequence: 0,
        }
    }

    /// Calendar day the spend belongs to
    pub fn date(&self) -> NaiveDate {
        self.recorded_at.date()
    }

    /// Validate the spend
    pub fn validate(&self) -> Result<(), SpendValidationError> {
        if !self.amount.is_positive() {
            return Err(SpendValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_limit() {
            return Err(SpendValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Spend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.id,
            self.recorded_at.format("%Y-%m-%d %H:%M"),
            self.amount
        )
    }
}

/// Validation errors for spends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpendValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for SpendValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Spend amount must be greater than zero, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Spend amount {} is above the limit of {}",
                amount, MAX_AMOUNT
            ),
        }
    }
}

impl std::error::Error for SpendValidationError {}

/// Sum the spends that fall on `date`
pub fn spent_on(spends: &[Spend], date: NaiveDate) -> Money {
    spends
        .iter()
        .filter(|s| s.date() == date)
        .map(|s| s.amount)
        .sum()
}

/// Sum the spends that fall in `[from, to]` (inclusive)
pub fn spent_between(spends: &[Spend], from: NaiveDate, to: NaiveDate) -> Money {
    spends
        .iter()
        .filter(|s| s.date() >= from && s.date() <= to)
        .map(|s| s.amount)
        .sum()
}
