//! Monthly budget figures derived from a snapshot.

pub mod budget;
pub mod cycle_impact;

pub use budget::{
    health_score, monthly_debt_payments, monthly_income, pay_periods_per_year, BudgetAnalysis,
    ExpenseTotals, HealthBand, CYCLES_PER_MONTH,
};
pub use cycle_impact::{twenty_eight_day_impact, CycleMonthImpact};
pub use crate::schedule::{three_paycheck_months, upcoming_pay_dates};
