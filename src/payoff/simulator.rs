use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Debt;

/// Ten years of monthly steps.
pub const DEFAULT_MONTH_CAP: u32 = 120;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PayoffStrategy {
    /// Highest interest rate first.
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

impl PayoffStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            PayoffStrategy::Avalanche => "avalanche",
            PayoffStrategy::Snowball => "snowball",
        }
    }

    fn order(&self, debts: &mut [Debt]) {
        match self {
            PayoffStrategy::Avalanche => {
                debts.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate))
            }
            PayoffStrategy::Snowball => debts.sort_by(|a, b| a.balance.total_cmp(&b.balance)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoffEvent {
    pub month: u32,
    pub debt_name: String,
    pub remaining_debts: usize,
    pub total_remaining_balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PayoffOutcome {
    Completed { months: u32 },
    /// The target debt's interest swallows the available payment.
    NonConvergent { month: u32, debt_name: String },
    CapReached { months: u32, remaining_balance: f64 },
}

impl PayoffOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, PayoffOutcome::Completed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoffPlan {
    pub strategy: PayoffStrategy,
    pub extra_monthly_payment: f64,
    pub events: Vec<PayoffEvent>,
    pub months_simulated: u32,
    pub total_interest: f64,
    pub outcome: PayoffOutcome,
}

/// Simulates paying down `debts` month by month.
///
/// Works on a private copy of the debts. Every month the first debt in strategy order
/// receives everything not reserved for the other debts' minimums; when it reaches zero
/// it is dropped and its freed minimum flows to the next target.
pub fn simulate_payoff(
    debts: &[Debt],
    strategy: PayoffStrategy,
    extra_monthly_payment: f64,
    month_cap: u32,
) -> PayoffPlan {
    let mut remaining: Vec<Debt> = debts.to_vec();
    strategy.order(&mut remaining);

    let total_available: f64 =
        remaining.iter().map(|debt| debt.minimum_payment).sum::<f64>() + extra_monthly_payment;
    let mut events = Vec::new();
    let mut total_interest = 0.0;
    let mut month = 1u32;
    let mut stalled = None;

    while !remaining.is_empty() && month <= month_cap {
        let reserved_for_others: f64 = remaining[1..]
            .iter()
            .map(|debt| debt.minimum_payment)
            .sum();
        let available_for_target = total_available - reserved_for_others;
        let target = &mut remaining[0];
        let interest = target.monthly_interest();
        let principal = (available_for_target - interest).max(0.0);

        if principal <= 0.0 {
            warn!(
                debt = %target.name,
                month,
                interest,
                available_for_target,
                "payoff stalled: payment does not cover interest"
            );
            stalled = Some(PayoffOutcome::NonConvergent {
                month,
                debt_name: target.name.clone(),
            });
            break;
        }

        total_interest += interest;
        target.balance = (target.balance - principal).max(0.0);

        if target.balance <= 0.0 {
            let paid = remaining.remove(0);
            let total_remaining_balance = remaining.iter().map(|debt| debt.balance).sum();
            debug!(debt = %paid.name, month, "debt paid off");
            events.push(PayoffEvent {
                month,
                debt_name: paid.name,
                remaining_debts: remaining.len(),
                total_remaining_balance,
            });
        }
        month += 1;
    }

    let months_simulated = month - 1;
    let outcome = match stalled {
        Some(outcome) => outcome,
        None if remaining.is_empty() => PayoffOutcome::Completed {
            months: months_simulated,
        },
        None => PayoffOutcome::CapReached {
            months: months_simulated,
            remaining_balance: remaining.iter().map(|debt| debt.balance).sum(),
        },
    };

    PayoffPlan {
        strategy,
        extra_monthly_payment,
        events,
        months_simulated,
        total_interest,
        outcome,
    }
}

/// Runs both strategies against the same debts.
pub fn compare_strategies(
    debts: &[Debt],
    extra_monthly_payment: f64,
    month_cap: u32,
) -> (PayoffPlan, PayoffPlan) {
    (
        simulate_payoff(debts, PayoffStrategy::Avalanche, extra_monthly_payment, month_cap),
        simulate_payoff(debts, PayoffStrategy::Snowball, extra_monthly_payment, month_cap),
    )
}
