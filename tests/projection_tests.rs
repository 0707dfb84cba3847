mod common;

use cashflow_core::domain::{
    snapshot::tracking_start_sentinel, BillId, BillPaymentLedger, BudgetSnapshot, ExpenseItem,
    IncomeProfile,
};
use cashflow_core::projection::{
    project, CashFlowProjector, DayStatus, ProjectionThresholds, PAY_EVENT_LABEL,
};
use cashflow_core::schedule::{expand_occurrences, ExpansionOptions};
use common::{date, household_snapshot, month, rent_and_pay_snapshot};

#[test]
fn january_rent_and_pay_scenario() {
    let snapshot = rent_and_pay_snapshot();
    let jan = month(2024, 1);
    let occurrences = expand_occurrences(
        &snapshot.expenses,
        &snapshot.debts,
        jan,
        tracking_start_sentinel(),
        &BillPaymentLedger::new(),
        &ExpansionOptions::default(),
    );
    let days = project(
        jan,
        &snapshot.income,
        &occurrences,
        0.0,
        tracking_start_sentinel(),
        &ProjectionThresholds::default(),
    );

    assert_eq!(days.len(), 31);
    let pay_days: Vec<_> = days
        .iter()
        .filter(|day| day.has_income())
        .map(|day| day.date)
        .collect();
    assert_eq!(pay_days, vec![date(2024, 1, 5), date(2024, 1, 19)]);

    let first = &days[0];
    assert_eq!(first.events.len(), 1);
    assert_eq!(first.events[0].label, "Rent");
    assert!(!first.events[0].is_incoming);
    assert_eq!(first.running_balance, -1200.0);
    assert_eq!(first.status, DayStatus::Critical);

    assert_eq!(days[4].events[0].label, PAY_EVENT_LABEL);
    assert_eq!(days[4].running_balance, -200.0);
    assert_eq!(days[18].running_balance, 800.0);
    assert_eq!(days[18].status, DayStatus::Good);
    assert_eq!(days[30].running_balance, 800.0);
}

#[test]
fn late_pay_day_reserves_for_next_months_rent() {
    let mut snapshot = rent_and_pay_snapshot();
    snapshot.tracking_start = Some(date(2024, 1, 1));
    let projection = CashFlowProjector::from_snapshot(&snapshot).project_month(month(2024, 1));

    let jan_5 = &projection.days[4];
    assert!(!jan_5.reserve_recommended);

    let jan_19 = &projection.days[18];
    assert!(jan_19.reserve_recommended);
    let reserve = jan_19.reserve.expect("reserve on the 19th");
    assert_eq!(reserve.next_pay_date, date(2024, 2, 2));
    assert_eq!(reserve.obligations, 1200.0);
    assert_eq!(jan_19.reserve_amount, 1500.0);
    assert_eq!(projection.closing_balance, 800.0);
    assert_eq!(projection.summary.reserve_day_count, 1);
}

#[test]
fn carried_balance_matches_previous_month_end() {
    let snapshot = household_snapshot();
    let projector = CashFlowProjector::from_snapshot(&snapshot);

    for m in month(2024, 1).iter_through(month(2025, 3)) {
        let this = projector.project_month(m);
        let next_opening = projector.opening_balance(m.succ());
        assert_eq!(next_opening, this.closing_balance, "carry into {}", m.succ());
        assert_eq!(projector.month_ending_balance(m), this.closing_balance);
    }
}

#[test]
fn range_projection_agrees_with_single_months() {
    let snapshot = household_snapshot();
    let projector = CashFlowProjector::from_snapshot(&snapshot);
    let range = projector.project_range(month(2024, 3), month(2024, 8));

    assert_eq!(range.len(), 6);
    for pair in range.windows(2) {
        assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
    }
    for projected in &range {
        let single = projector.project_month(projected.month);
        assert_eq!(single.opening_balance, projected.opening_balance);
        assert_eq!(single.closing_balance, projected.closing_balance);
    }
}

#[test]
fn paid_bills_are_not_subtracted_twice() {
    let mut snapshot = rent_and_pay_snapshot();
    snapshot.tracking_start = Some(date(2024, 1, 1));
    let rent_id = BillId::fixed(snapshot.expenses[0].id);

    let unpaid = BillPaymentLedger::new();
    let mut paid = BillPaymentLedger::new();
    paid.set_paid(month(2024, 1), rent_id, date(2024, 1, 1));

    let without = CashFlowProjector::new(&snapshot, &unpaid);
    let with = CashFlowProjector::new(&snapshot, &paid);

    assert_eq!(
        with.opening_balance(month(2024, 4)),
        without.opening_balance(month(2024, 4)) + 1200.0
    );

    let jan = with.project_month(month(2024, 1));
    assert_eq!(jan.days[0].running_balance, 0.0);
    assert!(jan.days[0].events[0].is_paid);
    assert_eq!(jan.closing_balance, 2000.0);
    assert_eq!(jan.summary.unpaid_bill_total, 0.0);
}

#[test]
fn months_without_events_stay_flat() {
    let snapshot = BudgetSnapshot::new(IncomeProfile::none(), 275.5);
    let projection = CashFlowProjector::from_snapshot(&snapshot).project_month(month(2030, 6));
    assert_eq!(projection.days.len(), 30);
    assert!(projection
        .days
        .iter()
        .all(|day| day.running_balance == 275.5 && day.events.is_empty()));
    assert_eq!(projection.closing_balance, 275.5);
}

#[test]
fn zero_income_only_declines() {
    let mut snapshot = BudgetSnapshot::new(IncomeProfile::none(), 1000.0);
    snapshot.tracking_start = Some(date(2024, 1, 1));
    snapshot.expenses.push(ExpenseItem::fixed("Rent", 450.0, 1));
    let projector = CashFlowProjector::from_snapshot(&snapshot);

    let months = projector.project_range(month(2024, 1), month(2024, 4));
    let closings: Vec<f64> = months.iter().map(|m| m.closing_balance).collect();
    assert_eq!(closings, vec![550.0, 100.0, -350.0, -800.0]);
    assert_eq!(months[1].days[0].status, DayStatus::Caution);
    assert_eq!(months[2].summary.critical_day_count, 31);
}

#[test]
fn thresholds_are_configurable() {
    let mut snapshot = rent_and_pay_snapshot();
    snapshot.starting_balance = 1500.0;
    snapshot.tracking_start = Some(date(2024, 1, 1));
    let strict = ProjectionThresholds {
        caution_threshold: 1000.0,
        reserve_buffer: 0.0,
    };
    let projection = CashFlowProjector::from_snapshot(&snapshot)
        .with_thresholds(strict)
        .project_month(month(2024, 1));

    assert_eq!(projection.days[0].running_balance, 300.0);
    assert_eq!(projection.days[0].status, DayStatus::Caution);
    assert_eq!(projection.days[18].running_balance, 2300.0);
    assert_eq!(projection.days[18].status, DayStatus::Good);
    assert!(!projection.days[18].reserve_recommended);
}

#[test]
fn pay_before_tracking_start_is_ignored() {
    let mut snapshot = rent_and_pay_snapshot();
    snapshot.tracking_start = Some(date(2024, 1, 10));
    let projection = CashFlowProjector::from_snapshot(&snapshot).project_month(month(2024, 1));

    assert_eq!(projection.pay_dates, vec![date(2024, 1, 19)]);
    assert!(projection.occurrences.is_empty());
    assert!(projection.days[..9].iter().all(|day| day.events.is_empty()));
    assert_eq!(projection.closing_balance, 1000.0);
}
