//! Currency-aware money formatting
//!
//! Formatting is a pure function of the amount, the currency tag and an
//! explicit [`FormatOptions`]; there is no ambient locale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{CurrencyTag, Money};

/// Where a currency symbol goes relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$1,234.50`
    Prefix,
    /// `1 234,50 ₽`
    Suffix,
}

/// Number formatting conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NumberLocale {
    /// 1,234.50 with the symbol in front
    #[default]
    EnUs,
    /// 1.234,50 with the symbol after
    DeDe,
    /// 1 234,50 with the symbol after
    FrFr,
    /// 1 234,50 with the symbol after
    RuRu,
}

impl NumberLocale {
    pub fn group_separator(self) -> &'static str {
        match self {
            Self::EnUs => ",",
            Self::DeDe => ".",
            Self::FrFr | Self::RuRu => " ",
        }
    }

    pub fn decimal_separator(self) -> &'static str {
        match self {
            Self::EnUs => ".",
            Self::DeDe | Self::FrFr | Self::RuRu => ",",
        }
    }

    pub fn symbol_placement(self) -> SymbolPlacement {
        match self {
            Self::EnUs => SymbolPlacement::Prefix,
            Self::DeDe | Self::FrFr | Self::RuRu => SymbolPlacement::Suffix,
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EnUs => "en-us",
            Self::DeDe => "de-de",
            Self::FrFr => "fr-fr",
            Self::RuRu => "ru-ru",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for NumberLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(Self::EnUs),
            "de-de" | "de" => Ok(Self::DeDe),
            "fr-fr" | "fr" => Ok(Self::FrFr),
            "ru-ru" | "ru" => Ok(Self::RuRu),
            other => Err(format!(
                "Unknown locale '{}' (expected en-us, de-de, fr-fr or ru-ru)",
                other
            )),
        }
    }
}

/// Explicit formatting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub min_fraction_digits: u32,
    pub max_fraction_digits: u32,
    pub locale: NumberLocale,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 2,
            locale: NumberLocale::EnUs,
        }
    }
}

/// Format an amount for display
///
/// Rounds half away from zero to `max_fraction_digits`, drops trailing zeros
/// down to `min_fraction_digits`, groups thousands, then places the currency
/// symbol. A list code that is not recognised falls back to the bare number.
pub fn format_money(amount: Money, currency: &CurrencyTag, options: &FormatOptions) -> String {
    let max = options.max_fraction_digits;
    let min = options.min_fraction_digits.min(max);
    let locale = options.locale;

    let rounded = amount.round_dp(max);
    let number = format_number(rounded, min, locale);
    let sign = if rounded.is_negative() { "-" } else { "" };

    match currency {
        CurrencyTag::FromList(code) => match crate::models::find_currency(code) {
            Some(info) => match locale.symbol_placement() {
                SymbolPlacement::Prefix => format!("{}{}{}", sign, info.symbol, number),
                SymbolPlacement::Suffix => format!("{}{} {}", sign, number, info.symbol),
            },
            None => format!("{}{}", sign, number),
        },
        CurrencyTag::Custom(label) => format!("{}{} {}", sign, number, label),
        CurrencyTag::None => format!("{}{}", sign, number),
    }
}

/// Unsigned, grouped number with the fraction trimmed to at least `min` digits
fn format_number(rounded: Money, min: u32, locale: NumberLocale) -> String {
    let digits = rounded.abs().amount().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.to_string()),
        None => (digits.as_str(), String::new()),
    };

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min as usize {
        frac.push('0');
    }

    let grouped = group_digits(int_part, locale.group_separator());
    if frac.is_empty() {
        grouped
    } else {
        format!("{}{}{}", grouped, locale.decimal_separator(), frac)
    }
}

fn group_digits(int_part: &str, separator: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
