//! Spend history formatting
//!
//! History is grouped by calendar day, newest day first, with a divider
//! line per day and a table of that day's spends.

use chrono::{Duration, NaiveDate};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::{Money, Spend};

#[derive(Tabled)]
struct SpendRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// "Today", "Yesterday" or the date in the configured format
pub fn pretty_date(date: NaiveDate, today: NaiveDate, date_format: &str) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today - Duration::days(1) {
        "Yesterday".to_string()
    } else {
        date.format(date_format).to_string()
    }
}

/// Group spends by day, keeping the input order within and across days
///
/// Expects newest-first input, as returned by the spend repository.
pub fn group_by_day(spends: &[Spend]) -> Vec<(NaiveDate, Vec<&Spend>)> {
    let mut groups: Vec<(NaiveDate, Vec<&Spend>)> = Vec::new();
    for spend in spends {
        match groups.last_mut() {
            Some((date, members)) if *date == spend.date() => members.push(spend),
            _ => groups.push((spend.date(), vec![spend])),
        }
    }
    groups
}

/// Format the spend history for the terminal
pub fn format_spend_history(spends: &[Spend], today: NaiveDate, settings: &Settings) -> String {
    if spends.is_empty() {
        return "No spends recorded in this period.\n".to_string();
    }

    let mut output = String::new();
    for (date, members) in group_by_day(spends) {
        let total: Money = members.iter().map(|s| s.amount).sum();
        output.push_str(&format!(
            "── {} · {} ──\n",
            pretty_date(date, today, &settings.date_format),
            settings.format_amount(total)
        ));

        let rows = members.iter().map(|spend| SpendRow {
            time: spend.recorded_at.format("%H:%M").to_string(),
            amount: settings.format_amount(spend.amount),
            id: spend.id.to_string(),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push_str("\n\n");
    }

    output
}

/// One-line confirmation of a recorded or removed spend
pub fn format_spend_line(spend: &Spend, today: NaiveDate, settings: &Settings) -> String {
    format!(
        "{} {} at {} ({})",
        settings.format_amount(spend.amount),
        pretty_date(spend.date(), today, &settings.date_format).to_lowercase(),
        spend.recorded_at.format("%H:%M"),
        spend.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn spend(d: u32, h: u32, major: i64) -> Spend {
        Spend::new(Money::from_major(major), day(d).and_hms_opt(h, 15, 0).unwrap())
    }

    #[test]
    fn test_pretty_date() {
        assert_eq!(pretty_date(day(10), day(10), "%d %b %Y"), "Today");
        assert_eq!(pretty_date(day(9), day(10), "%d %b %Y"), "Yesterday");
        assert_eq!(pretty_date(day(3), day(10), "%d %b %Y"), "03 Mar 2025");
        assert_eq!(pretty_date(day(3), day(10), "%Y-%m-%d"), "2025-03-03");
    }

    #[test]
    fn test_group_by_day() {
        let spends = vec![spend(10, 18, 5), spend(10, 9, 7), spend(8, 12, 3)];
        let groups = group_by_day(&spends);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, day(10));
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, day(8));
    }

    #[test]
    fn test_history_output() {
        let settings = Settings::default();
        let spends = vec![spend(10, 18, 5), spend(10, 9, 7), spend(8, 12, 1200)];

        let output = format_spend_history(&spends, day(10), &settings);

        assert!(output.contains("── Today · 12 ──"));
        assert!(output.contains("── 08 Mar 2025 · 1,200 ──"));
        assert!(output.contains("18:15"));
        assert!(output.contains(&spends[2].id.to_string()));
        assert!(output.find("Today").unwrap() < output.find("08 Mar 2025").unwrap());
    }

    #[test]
    fn test_empty_history() {
        let output = format_spend_history(&[], day(1), &Settings::default());
        assert!(output.contains("No spends"));
    }

    #[test]
    fn test_spend_line() {
        let s = spend(9, 8, 40);
        let line = format_spend_line(&s, day(10), &Settings::default());
        assert!(line.starts_with("40 yesterday at 08:15"));
    }
}
