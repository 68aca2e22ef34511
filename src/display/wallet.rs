//! Wallet, allowance and period summary formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::budget::{AllowanceOutcome, AllowanceReport, PeriodSummary, RedistributionPreview};
use crate::config::settings::Settings;
use crate::models::{CurrencyTag, DistributionChoice, Money, Wallet, CURRENCIES};

/// Wallet details with the rest of the budget
pub fn format_wallet(
    wallet: &Wallet,
    rest_budget: Money,
    today: NaiveDate,
    settings: &Settings,
) -> String {
    let date = |d: NaiveDate| d.format(&settings.date_format).to_string();
    let mut output = String::new();

    output.push_str(&format!(
        "Budget:      {}\n",
        settings.format_amount(wallet.total_budget())
    ));
    output.push_str(&format!(
        "Period:      {} to {} ({} days)\n",
        date(wallet.start_date()),
        date(wallet.finish_date()),
        wallet.day_count()
    ));

    if wallet.is_finished(today) {
        output.push_str("Days left:   finished\n");
    } else {
        output.push_str(&format!(
            "Days left:   {}\n",
            wallet.days_remaining(today)
        ));
    }
    output.push_str(&format!(
        "Rest:        {}\n",
        settings.format_amount(rest_budget)
    ));

    output
}

/// Today's allowance card
pub fn format_allowance_report(report: &AllowanceReport, settings: &Settings) -> String {
    let today = &report.today;
    let mut output = String::new();

    output.push_str(&format!(
        "{} left today (of {})\n",
        settings.format_amount(today.remaining()),
        settings.format_amount(today.allowance_at_start)
    ));
    output.push_str(&format!(
        "Spent today: {}\n",
        settings.format_amount(today.spent_today)
    ));
    output.push_str(&format!(
        "Days left:   {} (including today)\n",
        report.days_remaining
    ));
    output.push_str(&format!(
        "Rest:        {}\n",
        settings.format_amount(report.rest_budget)
    ));

    if let Some(applied) = &report.redistribution {
        let what = if applied.leftover.is_negative() {
            "Overspend"
        } else {
            "Leftover"
        };
        let verb = match applied.choice {
            DistributionChoice::AddToday => "was added to today",
            DistributionChoice::Rest => "was split over the remaining days",
        };
        output.push_str(&format!(
            "{} of {} from {} {}\n",
            what,
            settings.format_amount(applied.leftover.abs()),
            applied.from_date.format(&settings.date_format),
            verb
        ));
    }

    output
}

/// The question asked when the leftover is waiting for a decision
pub fn format_decision(
    from_date: NaiveDate,
    preview: &RedistributionPreview,
    settings: &Settings,
) -> String {
    let mut output = String::new();

    let what = if preview.leftover.is_negative() {
        "overspent"
    } else {
        "left over"
    };
    output.push_str(&format!(
        "You {} {} on {}. What should happen to it?\n\n",
        what,
        settings.format_amount(preview.leftover.abs()),
        from_date.format(&settings.date_format)
    ));
    output.push_str(&format!(
        "  add-today  today {}, then {} per day\n",
        settings.format_amount(preview.allowance_for(DistributionChoice::AddToday)),
        settings.format_amount(preview.add_today_following)
    ));
    output.push_str(&format!(
        "  rest       {} per day for {} days\n\n",
        settings.format_amount(preview.allowance_for(DistributionChoice::Rest)),
        preview.days_remaining
    ));
    output.push_str("Run 'buckwheat today --choice add-today' or 'buckwheat today --choice rest'.\n");

    output
}

/// Any calculation outcome
pub fn format_outcome(outcome: &AllowanceOutcome, settings: &Settings) -> String {
    match outcome {
        AllowanceOutcome::Ready(report) => format_allowance_report(report, settings),
        AllowanceOutcome::DecisionRequired {
            from_date, preview, ..
        } => format_decision(*from_date, preview, settings),
        AllowanceOutcome::NotStarted { starts_on } => format!(
            "The budget period starts on {}.\n",
            starts_on.format(&settings.date_format)
        ),
        AllowanceOutcome::Finished {
            finished_on,
            rest_budget,
        } => format!(
            "The budget period ended on {} with {} left.\nRun 'buckwheat wallet summary' to review it or 'buckwheat wallet set' to start a new one.\n",
            finished_on.format(&settings.date_format),
            settings.format_amount(*rest_budget)
        ),
    }
}

/// Whole-period summary card
pub fn format_period_summary(summary: &PeriodSummary, settings: &Settings) -> String {
    let amount = |m: Money| settings.format_amount(m);
    let optional = |m: Option<Money>| m.map(amount).unwrap_or_else(|| "-".to_string());
    let mut output = String::new();

    output.push_str(&format!("Budget:         {}\n", amount(summary.total_budget)));
    output.push_str(&format!(
        "Period:         {} to {} ({} days)\n",
        summary.start_date.format(&settings.date_format),
        summary.finish_date.format(&settings.date_format),
        summary.day_count
    ));
    output.push_str(&format!("Spent:          {}\n", amount(summary.spent)));
    output.push_str(&format!("Rest:           {}\n", amount(summary.rest)));
    output.push_str(&format!("Spends:         {}\n", summary.spend_count));
    output.push_str(&format!("Average / day:  {}\n", amount(summary.average_per_day)));
    output.push_str(&format!("Largest spend:  {}\n", optional(summary.largest_spend)));
    output.push_str(&format!("Smallest spend: {}\n", optional(summary.smallest_spend)));

    if summary.is_overspent() {
        output.push_str("The budget was overspent.\n");
    }

    output
}

#[derive(Tabled)]
struct CurrencyRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
}

/// The built-in currency list with the current choice marked
pub fn format_currency_list(current: &CurrencyTag) -> String {
    let selected = current.info().map(|c| c.code);
    let rows = CURRENCIES.iter().map(|c| CurrencyRow {
        marker: if Some(c.code) == selected { "*" } else { "" },
        code: c.code,
        name: c.name,
        symbol: c.symbol,
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// Current settings for `buckwheat settings show`
pub fn format_settings(settings: &Settings) -> String {
    let currency = match &settings.currency {
        CurrencyTag::FromList(code) => format!("{} {}", code, settings.currency.caption()),
        other => other.to_string(),
    };

    let mut output = String::new();
    output.push_str(&format!("Currency:            {}\n", currency));
    output.push_str(&format!(
        "Redistribution:      {}\n",
        settings.redistribution_method
    ));
    output.push_str(&format!(
        "Fraction digits:     {}..{}\n",
        settings.min_fraction_digits, settings.max_fraction_digits
    ));
    output.push_str(&format!("Number locale:       {}\n", settings.locale));
    output.push_str(&format!("Date format:         {}\n", settings.date_format));
    output.push_str(&format!(
        "Overspending warning: {}\n",
        if settings.hide_overspending_warn {
            "hidden"
        } else {
            "shown"
        }
    ));
    output.push_str(&format!(
        "Backups kept:        {} daily, {} monthly\n",
        settings.backup_retention.daily_count, settings.backup_retention.monthly_count
    ));
    output
}
