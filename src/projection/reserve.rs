use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::BillOccurrence;

/// Amount to set aside from a paycheck before spending freely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReserveRecommendation {
    pub next_pay_date: NaiveDate,
    pub obligations: f64,
    pub amount: f64,
}

/// Unpaid obligations due strictly after `after` and on or before `through`.
pub fn obligations_between(
    occurrences: &[BillOccurrence],
    after: NaiveDate,
    through: NaiveDate,
) -> f64 {
    occurrences
        .iter()
        .filter(|item| !item.is_paid && item.due_date > after && item.due_date <= through)
        .map(|item| item.amount)
        .sum()
}

/// Reserve check for a pay day.
///
/// `balance` is the running balance after the whole day was applied and
/// `day_income` the income received that day.
pub fn recommend_reserve(
    pay_date: NaiveDate,
    next_pay_date: NaiveDate,
    balance: f64,
    day_income: f64,
    occurrences: &[BillOccurrence],
    buffer: f64,
) -> Option<ReserveRecommendation> {
    let obligations = obligations_between(occurrences, pay_date, next_pay_date);
    if obligations <= 0.0 || balance - obligations >= buffer {
        return None;
    }
    let before_income = balance - day_income;
    Some(ReserveRecommendation {
        next_pay_date,
        obligations,
        amount: (obligations + buffer - before_income).max(0.0),
    })
}
