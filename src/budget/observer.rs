//! Publish/subscribe over recomputed budget state
//!
//! The core never holds listeners itself. Whoever drives recomputation owns
//! a [`Subscribers`] list and publishes each fresh snapshot to it.

use chrono::NaiveDate;

use super::allowance::AllowanceOutcome;
use crate::models::Wallet;

/// Read-only view handed to observers after each recomputation
#[derive(Debug, Clone, Copy)]
pub struct BudgetSnapshot<'a> {
    pub wallet: &'a Wallet,
    pub as_of: NaiveDate,
    pub outcome: &'a AllowanceOutcome,
}

impl BudgetSnapshot<'_> {
    pub fn days_remaining(&self) -> u32 {
        self.wallet.days_remaining(self.as_of)
    }
}

/// Something that reacts to budget changes
pub trait BudgetObserver {
    fn on_snapshot(&self, snapshot: &BudgetSnapshot<'_>);
}

/// Caller-owned list of observers
#[derive(Default)]
pub struct Subscribers<'a> {
    observers: Vec<&'a dyn BudgetObserver>,
}

impl<'a> Subscribers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: &'a dyn BudgetObserver) {
        self.observers.push(observer);
    }

    /// Deliver a snapshot to every observer, in subscription order
    pub fn publish(&self, snapshot: &BudgetSnapshot<'_>) {
        for observer in &self.observers {
            observer.on_snapshot(snapshot);
        }
    }
}
