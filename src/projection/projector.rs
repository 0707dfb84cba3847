use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    calendar::{merge_events, CalendarEvent},
    reserve::{recommend_reserve, ReserveRecommendation},
    thresholds::{DayStatus, ProjectionThresholds},
};
use crate::domain::{BillPaymentLedger, BudgetSnapshot, IncomeProfile, YearMonth};
use crate::schedule::{
    expand_occurrences, next_pay_after, pay_dates_for_month, BillOccurrence, ExpansionOptions,
    OneOffPolicy,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayProjection {
    pub date: NaiveDate,
    /// Balance after every event on this date was applied.
    pub running_balance: f64,
    pub events: Vec<CalendarEvent>,
    pub reserve_recommended: bool,
    pub reserve_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<ReserveRecommendation>,
    pub status: DayStatus,
}

impl DayProjection {
    pub fn has_income(&self) -> bool {
        self.events.iter().any(|event| event.is_incoming)
    }
}

/// Day-by-day walk of one month.
///
/// Produces one entry per calendar day. Occurrences outside the month (or before
/// `tracking_start`) never move the balance but still count towards the reserve
/// window of a late-month pay day.
pub fn project(
    month: YearMonth,
    income: &IncomeProfile,
    occurrences: &[BillOccurrence],
    opening_balance: f64,
    tracking_start: NaiveDate,
    thresholds: &ProjectionThresholds,
) -> Vec<DayProjection> {
    let pay_dates = pay_dates_for_month(income, month, tracking_start);
    let in_month: Vec<BillOccurrence> = occurrences
        .iter()
        .filter(|item| month.contains(item.due_date) && item.due_date >= tracking_start)
        .cloned()
        .collect();
    let mut grouped = merge_events(&pay_dates, income.net_per_period(), &in_month);

    let mut running = opening_balance;
    let mut days = Vec::with_capacity(month.days_in_month() as usize);
    let mut date = month.first_day();
    let last = month.last_day();
    while date <= last {
        let day = grouped.remove(&date).unwrap_or_default();
        if !day.events.is_empty() {
            running += day.net_delta();
        }

        let day_income = day.income();
        let reserve = if day_income > 0.0 {
            next_pay_after(income, date).and_then(|next| {
                recommend_reserve(
                    date,
                    next,
                    running,
                    day_income,
                    occurrences,
                    thresholds.reserve_buffer,
                )
            })
        } else {
            None
        };

        days.push(DayProjection {
            date,
            running_balance: running,
            events: day.events,
            reserve_recommended: reserve.is_some(),
            reserve_amount: reserve.map(|r| r.amount).unwrap_or(0.0),
            reserve,
            status: DayStatus::classify(running, thresholds),
        });
        date = date + Duration::days(1);
    }
    days
}

/// Balance at the end of the walk, or the opening balance when there are no days.
pub fn closing_balance(days: &[DayProjection], opening_balance: f64) -> f64 {
    days.last()
        .map(|day| day.running_balance)
        .unwrap_or(opening_balance)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthSummary {
    pub pay_day_count: usize,
    pub bill_count: usize,
    pub income_total: f64,
    pub expense_total: f64,
    pub unpaid_bill_total: f64,
    pub reserve_day_count: usize,
    pub total_reserve: f64,
    pub critical_day_count: usize,
    pub lowest_balance: f64,
    pub lowest_balance_date: Option<NaiveDate>,
}

impl MonthSummary {
    fn from_days(days: &[DayProjection], occurrences: &[BillOccurrence], opening: f64) -> Self {
        let mut summary = MonthSummary {
            lowest_balance: opening,
            ..MonthSummary::default()
        };
        for day in days {
            if day.has_income() {
                summary.pay_day_count += 1;
            }
            for event in &day.events {
                if event.is_incoming {
                    summary.income_total += event.amount;
                } else {
                    summary.expense_total += event.amount;
                }
            }
            if day.reserve_recommended {
                summary.reserve_day_count += 1;
                summary.total_reserve += day.reserve_amount;
            }
            if day.status == DayStatus::Critical {
                summary.critical_day_count += 1;
            }
            if summary.lowest_balance_date.is_none() || day.running_balance < summary.lowest_balance
            {
                summary.lowest_balance = day.running_balance;
                summary.lowest_balance_date = Some(day.date);
            }
        }
        summary.bill_count = occurrences.len();
        summary.unpaid_bill_total = occurrences.iter().map(BillOccurrence::outstanding).sum();
        summary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthProjection {
    pub month: YearMonth,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub pay_dates: Vec<NaiveDate>,
    pub occurrences: Vec<BillOccurrence>,
    pub days: Vec<DayProjection>,
    pub summary: MonthSummary,
}

/// Projects months of a snapshot, carrying balances forward from the tracking start.
///
/// Each month's opening balance is the closing balance of the month before, replayed
/// from the tracking-start month with the same walk, so the two always agree exactly.
pub struct CashFlowProjector<'a> {
    snapshot: &'a BudgetSnapshot,
    ledger: &'a BillPaymentLedger,
    thresholds: ProjectionThresholds,
    options: ExpansionOptions,
}

impl<'a> CashFlowProjector<'a> {
    pub fn new(snapshot: &'a BudgetSnapshot, ledger: &'a BillPaymentLedger) -> Self {
        Self {
            snapshot,
            ledger,
            thresholds: ProjectionThresholds::default(),
            options: ExpansionOptions::default(),
        }
    }

    /// Uses the ledger embedded in the snapshot.
    pub fn from_snapshot(snapshot: &'a BudgetSnapshot) -> Self {
        Self::new(snapshot, &snapshot.bill_payments)
    }

    pub fn with_thresholds(mut self, thresholds: ProjectionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_options(mut self, options: ExpansionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tracking_start(&self) -> NaiveDate {
        self.snapshot.effective_tracking_start()
    }

    pub fn tracking_month(&self) -> YearMonth {
        YearMonth::from_date(self.tracking_start())
    }

    /// Occurrences listed for `month`, filtered by the configured one-off policy.
    pub fn occurrences(&self, month: YearMonth) -> Vec<BillOccurrence> {
        self.expand(month, &self.options)
    }

    /// Every occurrence that moves the balance. Past one-offs are always kept so the
    /// carried balance does not depend on the reference date.
    fn scheduled(&self, month: YearMonth) -> Vec<BillOccurrence> {
        let options = self.options.with_one_off_policy(OneOffPolicy::KeepOverdue);
        self.expand(month, &options)
    }

    fn expand(&self, month: YearMonth, options: &ExpansionOptions) -> Vec<BillOccurrence> {
        expand_occurrences(
            &self.snapshot.expenses,
            &self.snapshot.debts,
            month,
            self.tracking_start(),
            self.ledger,
            options,
        )
    }

    /// Balance carried into `month`: an iterative fold over every month from the
    /// tracking-start month up to the one before `month`.
    pub fn opening_balance(&self, month: YearMonth) -> f64 {
        let start = self.tracking_month();
        if month <= start {
            return self.snapshot.starting_balance;
        }
        debug!(
            from = %start,
            to = %month,
            months = start.months_until(month),
            "replaying months for carry-forward balance"
        );
        start
            .iter_through(month.pred())
            .fold(self.snapshot.starting_balance, |balance, prior| {
                self.replay_month(prior, balance)
            })
    }

    pub fn month_ending_balance(&self, month: YearMonth) -> f64 {
        let opening = self.opening_balance(month);
        self.replay_month(month, opening)
    }

    pub fn project_month(&self, month: YearMonth) -> MonthProjection {
        let opening = self.opening_balance(month);
        self.project_from(month, opening)
    }

    /// Projects `from..=to`, replaying the backfill only once.
    pub fn project_range(&self, from: YearMonth, to: YearMonth) -> Vec<MonthProjection> {
        let mut opening = self.opening_balance(from);
        let mut months = Vec::new();
        for month in from.iter_through(to) {
            let projection = self.project_from(month, opening);
            opening = projection.closing_balance;
            months.push(projection);
        }
        months
    }

    fn project_from(&self, month: YearMonth, opening: f64) -> MonthProjection {
        let tracking_start = self.tracking_start();
        let occurrences = self.occurrences(month);
        let mut window = self.scheduled(month);
        window.extend(self.scheduled(month.succ()));

        let days = project(
            month,
            &self.snapshot.income,
            &window,
            opening,
            tracking_start,
            &self.thresholds,
        );
        let closing = closing_balance(&days, opening);
        let summary = MonthSummary::from_days(&days, &occurrences, opening);
        trace!(month = %month, opening, closing, "projected month");
        MonthProjection {
            month,
            opening_balance: opening,
            closing_balance: closing,
            pay_dates: pay_dates_for_month(&self.snapshot.income, month, tracking_start),
            occurrences,
            days,
            summary,
        }
    }

    /// Balance-only walk; applies the same per-day deltas in the same order as [`project`].
    fn replay_month(&self, month: YearMonth, opening: f64) -> f64 {
        let tracking_start = self.tracking_start();
        let pay_dates = pay_dates_for_month(&self.snapshot.income, month, tracking_start);
        let occurrences = self.scheduled(month);
        merge_events(&pay_dates, self.snapshot.income.net_per_period(), &occurrences)
            .values()
            .fold(opening, |balance, day| balance + day.net_delta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExpenseItem;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_month_is_flat() {
        let month = YearMonth::new(2024, 2).unwrap();
        let days = project(
            month,
            &IncomeProfile::none(),
            &[],
            350.0,
            date(1900, 1, 1),
            &ProjectionThresholds::default(),
        );
        assert_eq!(days.len(), 29);
        assert!(days.iter().all(|day| day.running_balance == 350.0));
        assert!(days.iter().all(|day| day.status == DayStatus::Good));
    }

    #[test]
    fn no_income_trends_negative() {
        let mut snapshot = BudgetSnapshot::new(IncomeProfile::none(), 100.0);
        snapshot.expenses.push(ExpenseItem::fixed("Rent", 500.0, 3));
        let projector = CashFlowProjector::from_snapshot(&snapshot);
        let march = projector.project_month(YearMonth::new(2024, 3).unwrap());
        assert!(march.pay_dates.is_empty());
        assert!(march.closing_balance < 0.0);
        assert!(march.days.iter().all(|day| !day.reserve_recommended));
    }

    #[test]
    fn dropped_one_offs_still_leave_the_balance() {
        let mut snapshot = BudgetSnapshot::new(IncomeProfile::none(), 9000.0);
        snapshot.tracking_start = Some(date(2024, 1, 1));
        snapshot
            .expenses
            .push(ExpenseItem::one_off("Car service", 310.0, date(2024, 2, 10)));
        let may = YearMonth::new(2024, 5).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();

        let snapshot = &snapshot;
        let as_of = move |today: NaiveDate| {
            CashFlowProjector::from_snapshot(snapshot).with_options(
                ExpansionOptions::as_of(today).with_one_off_policy(OneOffPolicy::DropPast),
            )
        };
        let early = as_of(date(2024, 1, 1));
        let late = as_of(date(2024, 4, 1));

        assert_eq!(early.opening_balance(may), 8690.0);
        assert_eq!(late.opening_balance(may), 8690.0);
        assert!(late.occurrences(feb).is_empty());
        assert_eq!(late.project_month(feb).closing_balance, 8690.0);
        assert_eq!(early.project_month(feb).occurrences.len(), 1);
    }

    #[test]
    fn months_before_tracking_start_use_starting_balance() {
        let mut snapshot = BudgetSnapshot::new(IncomeProfile::net(1000.0, date(2024, 1, 5)), 42.0);
        snapshot.tracking_start = Some(date(2024, 6, 1));
        let projector = CashFlowProjector::from_snapshot(&snapshot);
        assert_eq!(projector.opening_balance(YearMonth::new(2024, 2).unwrap()), 42.0);
        let feb = projector.project_month(YearMonth::new(2024, 2).unwrap());
        assert!(feb.pay_dates.is_empty());
        assert_eq!(feb.closing_balance, 42.0);
    }
}
