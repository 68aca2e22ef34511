//! Spend CLI commands

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Subcommand;

use super::today::{recompute, OverspendWarning};
use crate::budget::Subscribers;
use crate::config::settings::Settings;
use crate::display::{format_spend_history, format_spend_line};
use crate::error::{BuckwheatError, BuckwheatResult};
use crate::models::Money;
use crate::services::{Clock, SpendService};
use crate::storage::Storage;

/// Spend subcommands
#[derive(Subcommand)]
pub enum SpendCommands {
    /// Record a spend
    Add {
        /// Amount spent (e.g., "40" or "12.50")
        amount: String,
        /// When it happened: "HH:MM" today, or "YYYY-MM-DD HH:MM"
        #[arg(long)]
        at: Option<String>,
    },

    /// Delete a spend by id
    #[command(alias = "rm")]
    Delete {
        /// Spend id as shown in the history (spd-1a2b3c4d)
        id: String,
    },

    /// Delete the most recently recorded spend
    Undo,

    /// Spends of the current period, grouped by day
    #[command(alias = "ls")]
    History {
        /// Number of spends to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Parse `--at` relative to `today`
fn parse_recorded_at(value: &str, today: NaiveDate) -> BuckwheatResult<NaiveDateTime> {
    let value = value.trim();

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(at);
        }
    }
    for format in ["%H:%M", "%H:%M:%S"] {
        if let Ok(time) = NaiveTime::parse_from_str(value, format) {
            return Ok(today.and_time(time));
        }
    }

    Err(BuckwheatError::Validation(format!(
        "Invalid time '{}'. Use 'HH:MM' or 'YYYY-MM-DD HH:MM'",
        value
    )))
}

/// Handle a spend command
pub fn handle_spend_command(
    storage: &Storage,
    settings: &Settings,
    clock: &Clock,
    cmd: SpendCommands,
) -> BuckwheatResult<()> {
    let service = SpendService::new(storage);
    let today = clock.today();

    match cmd {
        SpendCommands::Add { amount, at } => {
            let amount = Money::parse(&amount).map_err(|e| {
                BuckwheatError::Validation(format!(
                    "Invalid amount '{}': {}. Use a format like '40' or '12.50'",
                    amount, e
                ))
            })?;
            let recorded_at = match at {
                Some(at) => parse_recorded_at(&at, today)?,
                None => clock.now(),
            };

            let spend = service.add(amount, recorded_at)?;
            println!("Recorded {}", format_spend_line(&spend, today, settings));

            let warning = OverspendWarning::new(settings);
            let mut subscribers = Subscribers::new();
            subscribers.subscribe(&warning);
            let view = recompute(storage, settings, clock, None, &subscribers)?;
            if let Some(report) = view.outcome.report() {
                println!(
                    "{} left today",
                    settings.format_amount(report.today.remaining())
                );
            }
        }

        SpendCommands::Delete { id } => {
            let spend = service.delete(&id)?;
            println!("Deleted {}", format_spend_line(&spend, today, settings));
        }

        SpendCommands::Undo => {
            let spend = service.undo_last()?;
            println!("Undone {}", format_spend_line(&spend, today, settings));
        }

        SpendCommands::History { limit } => {
            let spends = service.history(limit)?;
            print!("{}", format_spend_history(&spends, today, settings));
        }
    }

    Ok(())
}
