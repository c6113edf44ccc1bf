//! Risk classification
//!
//! Budget and planned duration are each placed in one of three tiers. A high
//! tier on either axis makes the project high risk; both axes in the low tier
//! make it low risk; anything else is medium.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::entities::RiskClassification;

/// Budgets up to this amount are in the low tier
const LOW_BUDGET_CEILING: i64 = 100_000;
/// Budgets up to this amount are in the middle tier
const MID_BUDGET_CEILING: i64 = 500_000;
/// Durations up to this many whole months are in the low tier
const LOW_DURATION_MONTHS: i64 = 3;
/// Durations up to this many whole months are in the middle tier
const MID_DURATION_MONTHS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Low,
    Mid,
    High,
}

fn budget_tier(budget: Decimal) -> Tier {
    if budget <= Decimal::from(LOW_BUDGET_CEILING) {
        Tier::Low
    } else if budget <= Decimal::from(MID_BUDGET_CEILING) {
        Tier::Mid
    } else {
        Tier::High
    }
}

fn duration_tier(months: i64) -> Tier {
    if months <= LOW_DURATION_MONTHS {
        Tier::Low
    } else if months <= MID_DURATION_MONTHS {
        Tier::Mid
    } else {
        Tier::High
    }
}

/// Whole calendar months from `start` to `end`.
///
/// A month only counts once the day of month has been reached, so
/// 2024-01-31 to 2024-02-29 is zero months and 2024-01-15 to 2024-04-15 is
/// three. Negative when `end` is before `start`.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = i64::from(end.year() - start.year()) * 12
        + i64::from(end.month()) - i64::from(start.month());

    if months > 0 && end.day() < start.day() {
        months -= 1;
    } else if months < 0 && end.day() > start.day() {
        months += 1;
    }
    months
}

/// Classify a project from its total budget and planned schedule
pub fn classify(budget: Decimal, start: NaiveDate, expected_end: NaiveDate) -> RiskClassification {
    debug_assert!(budget >= Decimal::ZERO, "budget must not be negative");
    debug_assert!(expected_end >= start, "schedule must not end before it starts");

    let months = whole_months_between(start, expected_end);
    match (budget_tier(budget), duration_tier(months)) {
        (Tier::High, _) | (_, Tier::High) => RiskClassification::High,
        (Tier::Low, Tier::Low) => RiskClassification::Low,
        (Tier::Low | Tier::Mid, Tier::Low | Tier::Mid) => RiskClassification::Medium,
    }
}
