use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::budget::CYCLES_PER_MONTH;
use crate::domain::{ExpenseItem, RecurrenceRule, YearMonth};
use crate::schedule::cycle_dates_between;

/// How many 28-day charges land in one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleMonthImpact {
    pub month: YearMonth,
    pub occurrence_count: usize,
    pub total: f64,
    /// Monthly-normalised average of the same items.
    pub average: f64,
    pub is_high_month: bool,
}

/// Per-month totals of 28-day items over `months` months from `start_month`.
///
/// A month is "high" when its total exceeds the normalised average, which in practice
/// means two charges of an item fell in it.
pub fn twenty_eight_day_impact(
    expenses: &[ExpenseItem],
    start_month: YearMonth,
    months: u32,
) -> Vec<CycleMonthImpact> {
    let cycles: Vec<(NaiveDate, f64)> = expenses
        .iter()
        .filter_map(|expense| match expense.rule {
            RecurrenceRule::TwentyEightDayCycle {
                anchor: Some(anchor),
            } => Some((anchor, expense.amount)),
            _ => None,
        })
        .collect();
    let average: f64 = cycles.iter().map(|(_, amount)| amount * CYCLES_PER_MONTH).sum();

    (0..months)
        .map(|offset| {
            let month = start_month.shift(offset as i32);
            let mut occurrence_count = 0;
            let mut total = 0.0;
            for (anchor, amount) in &cycles {
                let hits = cycle_dates_between(*anchor, month.first_day(), month.last_day()).len();
                occurrence_count += hits;
                total += amount * hits as f64;
            }
            CycleMonthImpact {
                month,
                occurrence_count,
                total,
                average,
                is_high_month: total > average + f64::EPSILON,
            }
        })
        .collect()
}
