//! User settings for Buckwheat
//!
//! Manages user preferences: display currency, number formatting, the
//! redistribution method, the overspending warning and backup retention.

use serde::{Deserialize, Serialize};

use super::paths::BuckwheatPaths;
use crate::display::money::{format_money, FormatOptions, NumberLocale};
use crate::error::BuckwheatError;
use crate::models::{CurrencyTag, Money, RedistributionMethod};

/// Upper bound for configurable fraction digits
pub const MAX_FRACTION_DIGITS: u32 = 8;

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// User settings for Buckwheat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency amounts are displayed in
    #[serde(default)]
    pub currency: CurrencyTag,

    /// What to do with a finished day's leftover
    #[serde(default)]
    pub redistribution_method: RedistributionMethod,

    #[serde(default)]
    pub min_fraction_digits: u32,

    #[serde(default = "default_max_fraction_digits")]
    pub max_fraction_digits: u32,

    /// Digit grouping and symbol placement convention
    #[serde(default)]
    pub locale: NumberLocale,

    /// Don't warn when today's allowance is exceeded
    #[serde(default)]
    pub hide_overspending_warn: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,
}

fn default_schema_version() -> u32 {
    1
}

fn default_max_fraction_digits() -> u32 {
    2
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: CurrencyTag::default(),
            redistribution_method: RedistributionMethod::default(),
            min_fraction_digits: 0,
            max_fraction_digits: default_max_fraction_digits(),
            locale: NumberLocale::default(),
            hide_overspending_warn: false,
            date_format: default_date_format(),
            backup_retention: BackupRetention::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BuckwheatPaths) -> Result<Self, BuckwheatError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BuckwheatError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BuckwheatError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BuckwheatPaths) -> Result<(), BuckwheatError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BuckwheatError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            BuckwheatError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Change the fraction digit range
    pub fn set_fraction_digits(&mut self, min: u32, max: u32) -> Result<(), BuckwheatError> {
        if min > max {
            return Err(BuckwheatError::Validation(format!(
                "Minimum fraction digits ({}) cannot exceed maximum ({})",
                min, max
            )));
        }
        if max > MAX_FRACTION_DIGITS {
            return Err(BuckwheatError::Validation(format!(
                "At most {} fraction digits are supported",
                MAX_FRACTION_DIGITS
            )));
        }
        self.min_fraction_digits = min;
        self.max_fraction_digits = max;
        Ok(())
    }

    /// Formatting configuration for amounts
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            min_fraction_digits: self.min_fraction_digits,
            max_fraction_digits: self.max_fraction_digits,
            locale: self.locale,
        }
    }

    /// Format an amount in the configured currency
    pub fn format_amount(&self, amount: Money) -> String {
        format_money(amount, &self.currency, &self.format_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.redistribution_method, RedistributionMethod::Ask);
        assert_eq!(settings.currency, CurrencyTag::None);
        assert_eq!(settings.max_fraction_digits, 2);
        assert!(!settings.hide_overspending_warn);
        assert_eq!(settings.backup_retention.daily_count, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.redistribution_method = RedistributionMethod::Rest;
        settings.currency = CurrencyTag::from_list("EUR").unwrap();
        settings.hide_overspending_warn = true;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.redistribution_method, RedistributionMethod::Rest);
        assert_eq!(loaded.currency, CurrencyTag::FromList("EUR".into()));
        assert!(loaded.hide_overspending_warn);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"schema_version": 1}"#).unwrap();
        assert_eq!(settings.max_fraction_digits, 2);
        assert_eq!(settings.date_format, "%d %b %Y");
    }

    #[test]
    fn test_set_fraction_digits() {
        let mut settings = Settings::default();
        settings.set_fraction_digits(2, 4).unwrap();
        assert_eq!(settings.format_options().min_fraction_digits, 2);
        assert_eq!(settings.format_options().max_fraction_digits, 4);

        assert!(settings.set_fraction_digits(3, 1).unwrap_err().is_validation());
        assert!(settings.set_fraction_digits(0, 20).is_err());
        assert_eq!(settings.max_fraction_digits, 4);
    }

    #[test]
    fn test_format_amount_uses_currency() {
        let mut settings = Settings::default();
        settings.currency = CurrencyTag::from_list("USD").unwrap();
        assert_eq!(settings.format_amount(Money::from_cents(123450)), "$1,234.5");

        settings.set_fraction_digits(2, 2).unwrap();
        assert_eq!(settings.format_amount(Money::from_cents(123450)), "$1,234.50");
    }
}
