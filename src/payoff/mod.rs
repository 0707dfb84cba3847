//! Debt payoff simulation (avalanche and snowball orderings).

pub mod simulator;

pub use simulator::{
    compare_strategies, simulate_payoff, PayoffEvent, PayoffOutcome, PayoffPlan, PayoffStrategy,
    DEFAULT_MONTH_CAP,
};

use serde::{Deserialize, Serialize};

use crate::domain::Debt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DebtSummary {
    pub total_balance: f64,
    pub total_minimum_payment: f64,
    /// Balance-weighted average APR.
    pub weighted_interest_rate: f64,
}

pub fn debt_summary(debts: &[Debt]) -> DebtSummary {
    let total_balance: f64 = debts.iter().map(|debt| debt.balance).sum();
    let total_minimum_payment = debts.iter().map(|debt| debt.minimum_payment).sum();
    let weighted_interest_rate = if total_balance > 0.0 {
        debts
            .iter()
            .map(|debt| debt.interest_rate * (debt.balance / total_balance))
            .sum()
    } else {
        0.0
    };
    DebtSummary {
        total_balance,
        total_minimum_payment,
        weighted_interest_rate,
    }
}
