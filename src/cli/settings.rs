//! Settings CLI commands
//!
//! Currency, redistribution method, number formatting and the overspending
//! warning. Every change goes through the settings service so it is audited.

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_currency_list, format_settings, NumberLocale};
use crate::error::{BuckwheatError, BuckwheatResult};
use crate::models::currency::CurrencyError;
use crate::models::{CurrencyTag, RedistributionMethod};
use crate::services::SettingsService;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings
    Show,

    /// Choose the display currency
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// What happens to a finished day's leftover: ask, add-today or rest
    Method {
        method: RedistributionMethod,
    },

    /// Minimum and maximum number of fraction digits
    Digits {
        min: u32,
        max: u32,
    },

    /// Digit grouping convention: en-us, de-de, fr-fr or ru-ru
    Locale {
        locale: NumberLocale,
    },

    /// Show or hide the warning printed when today's budget is over
    OverspendWarning {
        #[arg(value_enum)]
        visibility: Visibility,
    },

    /// Date format used in listings (strftime syntax, e.g. "%Y-%m-%d")
    DateFormat {
        format: String,
    },
}

/// Currency subcommands
#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// List the built-in currencies
    List,
    /// Use a currency from the list by its code
    Set {
        /// ISO code such as USD or EUR
        code: String,
    },
    /// Use a free-form label
    Custom {
        label: String,
    },
    /// Show bare numbers
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Visibility {
    Show,
    Hide,
}

fn currency_error(err: CurrencyError, input: &str) -> BuckwheatError {
    match err {
        CurrencyError::UnknownCode(code) => BuckwheatError::currency_not_found(code),
        CurrencyError::EmptyLabel => {
            BuckwheatError::Validation(format!("Currency label '{}' is empty", input))
        }
    }
}

/// Reject formats chrono cannot render
fn check_date_format(format: &str) -> BuckwheatResult<()> {
    use chrono::format::{Item, StrftimeItems};
    use std::fmt::Write;

    if format.trim().is_empty() || StrftimeItems::new(format).any(|i| matches!(i, Item::Error)) {
        return Err(BuckwheatError::Validation(format!(
            "Invalid date format '{}'",
            format
        )));
    }
    let mut probe = String::new();
    write!(probe, "{}", chrono::NaiveDate::MIN.format(format)).map_err(|_| {
        BuckwheatError::Validation(format!("Date format '{}' needs a time of day", format))
    })
}

/// Handle a settings command
///
/// `settings` is the state loaded at startup, used for read-only views.
pub fn handle_settings_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SettingsCommands,
) -> BuckwheatResult<()> {
    let service = SettingsService::new(storage);

    let updated = match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(settings));
            return Ok(());
        }

        SettingsCommands::Currency(CurrencyCommands::List) => {
            print!("{}", format_currency_list(&settings.currency));
            return Ok(());
        }

        SettingsCommands::Currency(CurrencyCommands::Set { code }) => {
            let tag = CurrencyTag::from_list(&code).map_err(|e| currency_error(e, &code))?;
            service.update(|s| {
                s.currency = tag;
                Ok(())
            })?
        }

        SettingsCommands::Currency(CurrencyCommands::Custom { label }) => {
            let tag = CurrencyTag::custom(&label).map_err(|e| currency_error(e, &label))?;
            service.update(|s| {
                s.currency = tag;
                Ok(())
            })?
        }

        SettingsCommands::Currency(CurrencyCommands::None) => service.update(|s| {
            s.currency = CurrencyTag::None;
            Ok(())
        })?,

        SettingsCommands::Method { method } => service.update(|s| {
            s.redistribution_method = method;
            Ok(())
        })?,

        SettingsCommands::Digits { min, max } => {
            service.update(|s| s.set_fraction_digits(min, max))?
        }

        SettingsCommands::Locale { locale } => service.update(|s| {
            s.locale = locale;
            Ok(())
        })?,

        SettingsCommands::OverspendWarning { visibility } => service.update(|s| {
            s.hide_overspending_warn = visibility == Visibility::Hide;
            Ok(())
        })?,

        SettingsCommands::DateFormat { format } => {
            check_date_format(&format)?;
            service.update(|s| {
                s.date_format = format;
                Ok(())
            })?
        }
    };

    println!("Settings saved.");
    print!("{}", format_settings(&updated));
    Ok(())
}
