mod common;

use cashflow_core::analysis::{
    monthly_income, three_paycheck_months, twenty_eight_day_impact, upcoming_pay_dates,
    BudgetAnalysis, HealthBand,
};
use cashflow_core::domain::{BudgetSnapshot, Debt, ExpenseItem, IncomeProfile};
use common::{date, household_snapshot, month};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn household_budget_breakdown() {
    let snapshot = household_snapshot();
    let analysis = BudgetAnalysis::for_snapshot(&snapshot);

    assert!(close(analysis.monthly_income, 1400.0 * 26.0 / 12.0));
    assert_eq!(analysis.expenses.fixed, 1145.0);
    assert_eq!(analysis.expenses.variable, 120.0);
    assert_eq!(analysis.expenses.discretionary, 200.0);
    assert!(close(analysis.expenses.twenty_eight_day, 28.0 * 13.0 / 12.0));
    assert_eq!(analysis.expenses.one_off_scheduled, 310.0);
    assert_eq!(analysis.debt_payments, 255.0);
    // One-offs stay out of the recurring outgoings.
    assert!(close(
        analysis.total_monthly_outgoings,
        1145.0 + 120.0 + 200.0 + 28.0 * 13.0 / 12.0 + 255.0
    ));
    assert!(analysis.monthly_surplus > 0.0);
    assert_eq!(analysis.health_score, 100);
    assert_eq!(analysis.health_band, HealthBand::Healthy);
}

#[test]
fn overstretched_budget_scores_at_risk() {
    let mut snapshot = BudgetSnapshot::new(IncomeProfile::net(1000.0, date(2024, 1, 5)), 0.0);
    snapshot.expenses.push(ExpenseItem::fixed("Rent", 2000.0, 1));
    snapshot.debts.push(Debt::new("Loan", 9000.0, 12.0, 800.0));

    let analysis = BudgetAnalysis::for_snapshot(&snapshot);
    assert!(analysis.monthly_surplus < 0.0);
    assert_eq!(analysis.health_score, 35);
    assert_eq!(analysis.health_band, HealthBand::AtRisk);
}

#[test]
fn gross_income_is_taxed_before_normalising() {
    let income = IncomeProfile::gross(2000.0, 0.25, date(2024, 1, 5));
    assert!(close(monthly_income(&income), 1500.0 * 26.0 / 12.0));
}

#[test]
fn pay_schedule_helpers() {
    let income = household_snapshot().income;
    assert_eq!(
        three_paycheck_months(&income, 2024),
        vec![month(2024, 5), month(2024, 11)]
    );
    assert_eq!(
        upcoming_pay_dates(&income, date(2024, 1, 13), 3),
        vec![date(2024, 1, 26), date(2024, 2, 9), date(2024, 2, 23)]
    );
    assert!(three_paycheck_months(&IncomeProfile::none(), 2024).is_empty());
}

#[test]
fn double_charge_months_for_28_day_items() {
    let snapshot = household_snapshot();
    let impact = twenty_eight_day_impact(&snapshot.expenses, month(2024, 1), 13);

    let high: Vec<_> = impact
        .iter()
        .filter(|m| m.is_high_month)
        .map(|m| m.month)
        .collect();
    assert_eq!(high, vec![month(2024, 1), month(2025, 1)]);
    assert_eq!(impact[0].occurrence_count, 2);
    assert_eq!(impact[0].total, 56.0);
    assert_eq!(impact[12].month, month(2025, 1));
    assert_eq!(impact[11].occurrence_count, 1);
    assert_eq!(impact[12].occurrence_count, 2);
}
