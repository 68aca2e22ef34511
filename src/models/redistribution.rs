//! What happens to yesterday's leftover (or overspend) when a new day starts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User preference for redistributing the rest of a finished day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedistributionMethod {
    /// Ask every time a day with a leftover ends
    #[default]
    Ask,
    /// Put the whole leftover on top of today
    AddToday,
    /// Spread the leftover evenly over today and the remaining days
    Rest,
}

impl RedistributionMethod {
    /// The automatic choice for this method, or `None` when the user must decide
    pub fn automatic_choice(self) -> Option<DistributionChoice> {
        match self {
            Self::Ask => None,
            Self::AddToday => Some(DistributionChoice::AddToday),
            Self::Rest => Some(DistributionChoice::Rest),
        }
    }
}

impl fmt::Display for RedistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ask => write!(f, "always ask"),
            Self::AddToday => write!(f, "add to current day"),
            Self::Rest => write!(f, "split to rest days"),
        }
    }
}

impl FromStr for RedistributionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "ask" => Ok(Self::Ask),
            "add-today" | "today" => Ok(Self::AddToday),
            "rest" | "split" => Ok(Self::Rest),
            other => Err(format!(
                "Unknown redistribution method '{}' (expected ask, add-today or rest)",
                other
            )),
        }
    }
}

/// A concrete decision applied to one day-boundary crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionChoice {
    AddToday,
    Rest,
}

impl From<DistributionChoice> for RedistributionMethod {
    fn from(choice: DistributionChoice) -> Self {
        match choice {
            DistributionChoice::AddToday => Self::AddToday,
            DistributionChoice::Rest => Self::Rest,
        }
    }
}

impl fmt::Display for DistributionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RedistributionMethod::from(*self).fmt(f)
    }
}

impl FromStr for DistributionChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RedistributionMethod::from_str(s)?
            .automatic_choice()
            .ok_or_else(|| "A one-off choice must be add-today or rest".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ask() {
        assert_eq!(RedistributionMethod::default(), RedistributionMethod::Ask);
        assert_eq!(RedistributionMethod::Ask.automatic_choice(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "add-today".parse::<RedistributionMethod>().unwrap(),
            RedistributionMethod::AddToday
        );
        assert_eq!(
            "ADD_TODAY".parse::<RedistributionMethod>().unwrap(),
            RedistributionMethod::AddToday
        );
        assert_eq!(
            "rest".parse::<RedistributionMethod>().unwrap(),
            RedistributionMethod::Rest
        );
        assert!("sometimes".parse::<RedistributionMethod>().is_err());

        assert_eq!(
            "rest".parse::<DistributionChoice>().unwrap(),
            DistributionChoice::Rest
        );
        assert!("ask".parse::<DistributionChoice>().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&RedistributionMethod::AddToday).unwrap();
        assert_eq!(json, "\"add_today\"");
        let back: RedistributionMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RedistributionMethod::AddToday);
    }
}
