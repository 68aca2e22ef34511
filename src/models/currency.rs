//! Currency tags and the built-in list of supported currencies
//!
//! A budget is displayed either in a currency picked from the list below, in
//! a user-typed custom label ("coins", "₿"), or without any currency at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata for a currency from the built-in list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// ISO 4217 code
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
    /// Display symbol
    pub symbol: &'static str,
    /// Usual number of fraction digits
    pub fraction_digits: u32,
}

const fn info(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    fraction_digits: u32,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        name,
        symbol,
        fraction_digits,
    }
}

/// Currencies that can be chosen from the list
pub const CURRENCIES: &[CurrencyInfo] = &[
    info("AED", "UAE Dirham", "د.إ", 2),
    info("AUD", "Australian Dollar", "A$", 2),
    info("BRL", "Brazilian Real", "R$", 2),
    info("BYN", "Belarusian Ruble", "Br", 2),
    info("CAD", "Canadian Dollar", "CA$", 2),
    info("CHF", "Swiss Franc", "CHF", 2),
    info("CNY", "Chinese Yuan", "CN¥", 2),
    info("CZK", "Czech Koruna", "Kč", 2),
    info("DKK", "Danish Krone", "kr", 2),
    info("EUR", "Euro", "€", 2),
    info("GBP", "British Pound", "£", 2),
    info("GEL", "Georgian Lari", "₾", 2),
    info("HKD", "Hong Kong Dollar", "HK$", 2),
    info("HUF", "Hungarian Forint", "Ft", 2),
    info("IDR", "Indonesian Rupiah", "Rp", 2),
    info("ILS", "Israeli New Shekel", "₪", 2),
    info("INR", "Indian Rupee", "₹", 2),
    info("JPY", "Japanese Yen", "¥", 0),
    info("KRW", "South Korean Won", "₩", 0),
    info("KZT", "Kazakhstani Tenge", "₸", 2),
    info("MXN", "Mexican Peso", "MX$", 2),
    info("NOK", "Norwegian Krone", "kr", 2),
    info("NZD", "New Zealand Dollar", "NZ$", 2),
    info("PLN", "Polish Zloty", "zł", 2),
    info("RSD", "Serbian Dinar", "din", 2),
    info("RUB", "Russian Ruble", "₽", 2),
    info("SEK", "Swedish Krona", "kr", 2),
    info("SGD", "Singapore Dollar", "SGD", 2),
    info("THB", "Thai Baht", "฿", 2),
    info("TRY", "Turkish Lira", "₺", 2),
    info("UAH", "Ukrainian Hryvnia", "₴", 2),
    info("USD", "US Dollar", "$", 2),
    info("UZS", "Uzbekistani Som", "soʻm", 2),
    info("VND", "Vietnamese Dong", "₫", 0),
    info("ZAR", "South African Rand", "R", 2),
];

/// Look up a currency in the built-in list (case-insensitive)
pub fn find_currency(code: &str) -> Option<&'static CurrencyInfo> {
    let code = code.trim();
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

/// How amounts are labelled when displayed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CurrencyTag {
    /// A currency from the built-in list, identified by ISO code
    FromList(String),
    /// Free-form label typed by the user
    Custom(String),
    /// Bare numbers
    #[default]
    None,
}

impl CurrencyTag {
    /// Create a list currency, rejecting codes that are not in the list
    pub fn from_list(code: &str) -> Result<Self, CurrencyError> {
        find_currency(code)
            .map(|c| Self::FromList(c.code.to_string()))
            .ok_or_else(|| CurrencyError::UnknownCode(code.trim().to_string()))
    }

    /// Create a custom label currency
    pub fn custom(label: &str) -> Result<Self, CurrencyError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CurrencyError::EmptyLabel);
        }
        Ok(Self::Custom(label.to_string()))
    }

    /// Metadata for list currencies; `None` for custom labels, no currency,
    /// or a code that is no longer in the list
    pub fn info(&self) -> Option<&'static CurrencyInfo> {
        match self {
            Self::FromList(code) => find_currency(code),
            _ => None,
        }
    }

    /// Caption shown next to the currency setting
    pub fn caption(&self) -> String {
        match self {
            Self::FromList(code) => match find_currency(code) {
                Some(c) => format!("{} ({})", c.name, c.symbol),
                None => code.clone(),
            },
            Self::Custom(label) => label.clone(),
            Self::None => String::new(),
        }
    }
}

impl fmt::Display for CurrencyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromList(code) => write!(f, "{}", code),
            Self::Custom(label) => write!(f, "custom \"{}\"", label),
            Self::None => write!(f, "none"),
        }
    }
}

/// Error type for currency tag construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    UnknownCode(String),
    EmptyLabel,
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::UnknownCode(code) => write!(f, "Unknown currency code: {}", code),
            CurrencyError::EmptyLabel => write!(f, "Custom currency label cannot be empty"),
        }
    }
}

impl std::error::Error for CurrencyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_list_is_sorted_and_unique() {
        for pair in CURRENCIES.windows(2) {
            assert!(pair[0].code < pair[1].code, "{} >= {}", pair[0].code, pair[1].code);
        }
        assert!(CURRENCIES.iter().all(|c| c.code.len() == 3));
    }

    #[test]
    fn test_from_list() {
        assert_eq!(
            CurrencyTag::from_list("usd").unwrap(),
            CurrencyTag::FromList("USD".into())
        );
        assert_eq!(
            CurrencyTag::from_list("XYZ"),
            Err(CurrencyError::UnknownCode("XYZ".into()))
        );
    }

    #[test]
    fn test_custom() {
        assert_eq!(
            CurrencyTag::custom("  coins ").unwrap(),
            CurrencyTag::Custom("coins".into())
        );
        assert_eq!(CurrencyTag::custom("   "), Err(CurrencyError::EmptyLabel));
    }

    #[test]
    fn test_caption() {
        assert_eq!(
            CurrencyTag::from_list("EUR").unwrap().caption(),
            "Euro (€)"
        );
        assert_eq!(CurrencyTag::Custom("coins".into()).caption(), "coins");
        assert_eq!(CurrencyTag::None.caption(), "");
        // A corrupt code stays displayable
        assert_eq!(CurrencyTag::FromList("???".into()).caption(), "???");
    }

    #[test]
    fn test_serialization() {
        let tag = CurrencyTag::from_list("JPY").unwrap();
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#"{"type":"from_list","value":"JPY"}"#);
        let back: CurrencyTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tag);

        let none: CurrencyTag = serde_json::from_str(r#"{"type":"none"}"#).unwrap();
        assert_eq!(none, CurrencyTag::None);
    }
}
