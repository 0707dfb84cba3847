use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{IncomeProfile, YearMonth};

/// Pay dates falling within `[start, end]`, generated by fixed steps from the anchor
/// in either direction.
pub fn pay_dates_between(income: &IncomeProfile, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let Some(anchor) = income.schedule_anchor() else {
        return Vec::new();
    };
    if end < start {
        return Vec::new();
    }
    let period = i64::from(income.pay_period_days);
    let mut current = first_on_or_after(anchor, period, start);
    let mut dates = Vec::new();
    while current <= end {
        dates.push(current);
        current = current + Duration::days(period);
    }
    dates
}

/// Pay dates inside `month`, excluding any before `tracking_start`.
pub fn pay_dates_for_month(
    income: &IncomeProfile,
    month: YearMonth,
    tracking_start: NaiveDate,
) -> Vec<NaiveDate> {
    let start = month.first_day().max(tracking_start);
    pay_dates_between(income, start, month.last_day())
}

/// The first pay date strictly after `date`.
pub fn next_pay_after(income: &IncomeProfile, date: NaiveDate) -> Option<NaiveDate> {
    let anchor = income.schedule_anchor()?;
    let period = i64::from(income.pay_period_days);
    Some(first_on_or_after(anchor, period, date + Duration::days(1)))
}

/// The next `count` pay dates on or after `from`.
pub fn upcoming_pay_dates(income: &IncomeProfile, from: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let Some(anchor) = income.schedule_anchor() else {
        return Vec::new();
    };
    let period = i64::from(income.pay_period_days);
    let first = first_on_or_after(anchor, period, from);
    (0..count)
        .map(|step| first + Duration::days(period * step as i64))
        .collect()
}

/// Months of `year` that receive three or more paychecks.
pub fn three_paycheck_months(income: &IncomeProfile, year: i32) -> Vec<YearMonth> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return Vec::new();
    };
    let mut counts = [0usize; 12];
    for date in pay_dates_between(income, start, end) {
        counts[date.month0() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count >= 3)
        .filter_map(|(idx, _)| YearMonth::new(year, idx as u32 + 1).ok())
        .collect()
}

fn first_on_or_after(anchor: NaiveDate, period_days: i64, reference: NaiveDate) -> NaiveDate {
    let diff = (reference - anchor).num_days();
    let mut steps = diff.div_euclid(period_days);
    if diff.rem_euclid(period_days) != 0 {
        steps += 1;
    }
    anchor + Duration::days(steps * period_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn steps_backwards_and_forwards_from_anchor() {
        let income = IncomeProfile::net(1000.0, date(2024, 3, 1));
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(
            pay_dates_for_month(&income, jan, date(1900, 1, 1)),
            vec![date(2024, 1, 5), date(2024, 1, 19)]
        );
        let mar = YearMonth::new(2024, 3).unwrap();
        assert_eq!(
            pay_dates_for_month(&income, mar, date(1900, 1, 1)),
            vec![date(2024, 3, 1), date(2024, 3, 15), date(2024, 3, 29)]
        );
    }

    #[test]
    fn respects_tracking_start() {
        let income = IncomeProfile::net(1000.0, date(2024, 1, 5));
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(
            pay_dates_for_month(&income, jan, date(2024, 1, 10)),
            vec![date(2024, 1, 19)]
        );
    }

    #[test]
    fn next_pay_is_strictly_after() {
        let income = IncomeProfile::net(1000.0, date(2024, 1, 5));
        assert_eq!(next_pay_after(&income, date(2024, 1, 5)), Some(date(2024, 1, 19)));
        assert_eq!(next_pay_after(&income, date(2024, 1, 4)), Some(date(2024, 1, 5)));
        assert_eq!(next_pay_after(&IncomeProfile::none(), date(2024, 1, 4)), None);
    }

    #[test]
    fn finds_three_paycheck_months() {
        let income = IncomeProfile::net(1000.0, date(2024, 1, 5));
        let months = three_paycheck_months(&income, 2024);
        assert_eq!(
            months,
            vec![YearMonth::new(2024, 3).unwrap(), YearMonth::new(2024, 8).unwrap()]
        );
        assert_eq!(upcoming_pay_dates(&income, date(2024, 1, 1), 26).len(), 26);
    }
}
