//! Wallet CLI commands
//!
//! Setting up the budget period and looking at it as a whole.

use chrono::{Duration, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_period_summary, format_wallet};
use crate::error::{BuckwheatError, BuckwheatResult};
use crate::models::Money;
use crate::services::{Clock, SetWalletInput, WalletService};
use crate::storage::Storage;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Show the budget, its period and what is left of it
    Show,

    /// Start a new budget period today
    Set {
        /// Total amount for the period (e.g., "3000" or "2999.50")
        #[arg(short, long)]
        budget: String,
        /// Last day of the period (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "days", required_unless_present = "days")]
        finish: Option<NaiveDate>,
        /// Length of the period in days, today included
        #[arg(short, long)]
        days: Option<u32>,
        /// Replace a period that already has spends
        #[arg(long)]
        confirm: bool,
    },

    /// Whole-period statistics
    Summary,
}

/// Last day of a period of `days` days starting on `today`
fn finish_from_days(today: NaiveDate, days: u32) -> BuckwheatResult<NaiveDate> {
    if days == 0 {
        return Err(BuckwheatError::Validation(
            "A budget period needs at least one day".into(),
        ));
    }
    Ok(today + Duration::days(i64::from(days) - 1))
}

/// Handle a wallet command
pub fn handle_wallet_command(
    storage: &Storage,
    settings: &Settings,
    clock: &Clock,
    cmd: WalletCommands,
) -> BuckwheatResult<()> {
    let service = WalletService::new(storage);
    let today = clock.today();

    match cmd {
        WalletCommands::Show => {
            let wallet = service.current()?;
            let rest = service.rest_budget()?;
            print!("{}", format_wallet(&wallet, rest, today, settings));
        }

        WalletCommands::Set {
            budget,
            finish,
            days,
            confirm,
        } => {
            let total_budget = Money::parse(&budget).map_err(|e| {
                BuckwheatError::Validation(format!(
                    "Invalid budget '{}': {}. Use a format like '3000' or '2999.50'",
                    budget, e
                ))
            })?;

            let finish_date = match (finish, days) {
                (Some(date), _) => date,
                (None, Some(days)) => finish_from_days(today, days)?,
                (None, None) => {
                    return Err(BuckwheatError::Validation(
                        "Pass either --finish or --days".into(),
                    ))
                }
            };

            let wallet = service.set(
                SetWalletInput {
                    finish_date,
                    total_budget,
                    confirm,
                },
                today,
            )?;

            let rest = service.rest_budget()?;
            println!("New budget set.");
            print!("{}", format_wallet(&wallet, rest, today, settings));
            println!();
            println!("Run 'buckwheat today' to see today's allowance.");
        }

        WalletCommands::Summary => {
            let summary = service.summary(today)?;
            print!("{}", format_period_summary(&summary, settings));
        }
    }

    Ok(())
}
