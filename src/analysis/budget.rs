use serde::{Deserialize, Serialize};

use crate::domain::{BudgetSnapshot, Debt, ExpenseCategory, ExpenseItem, IncomeProfile};

/// 13 cycles of 28 days fit in a year, spread over 12 months.
pub const CYCLES_PER_MONTH: f64 = 13.0 / 12.0;

pub fn pay_periods_per_year(income: &IncomeProfile) -> f64 {
    if income.schedule_anchor().is_none() {
        return 0.0;
    }
    364.0 / f64::from(income.pay_period_days)
}

pub fn monthly_income(income: &IncomeProfile) -> f64 {
    income.net_per_period() * pay_periods_per_year(income) / 12.0
}

/// Monthly-normalised expense totals. One-offs are reported apart from the recurring sum.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseTotals {
    pub fixed: f64,
    pub variable: f64,
    pub discretionary: f64,
    pub twenty_eight_day: f64,
    pub one_off_scheduled: f64,
}

impl ExpenseTotals {
    pub fn from_expenses(expenses: &[ExpenseItem]) -> Self {
        let mut totals = ExpenseTotals::default();
        for expense in expenses {
            match expense.category() {
                ExpenseCategory::Fixed => totals.fixed += expense.amount,
                ExpenseCategory::Variable => totals.variable += expense.amount,
                ExpenseCategory::Discretionary => totals.discretionary += expense.amount,
                ExpenseCategory::TwentyEightDayCycle => {
                    totals.twenty_eight_day += expense.amount * CYCLES_PER_MONTH
                }
                ExpenseCategory::OneOff => totals.one_off_scheduled += expense.amount,
            }
        }
        totals
    }

    pub fn recurring_total(&self) -> f64 {
        self.fixed + self.variable + self.discretionary + self.twenty_eight_day
    }
}

pub fn monthly_debt_payments(debts: &[Debt]) -> f64 {
    debts.iter().map(|debt| debt.minimum_payment).sum()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    Fair,
    AtRisk,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => HealthBand::Healthy,
            60..=79 => HealthBand::Fair,
            _ => HealthBand::AtRisk,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetAnalysis {
    pub monthly_income: f64,
    pub expenses: ExpenseTotals,
    pub debt_payments: f64,
    pub total_monthly_outgoings: f64,
    pub monthly_surplus: f64,
    pub health_score: u8,
    pub health_band: HealthBand,
}

impl BudgetAnalysis {
    pub fn for_snapshot(snapshot: &BudgetSnapshot) -> Self {
        let monthly_income = monthly_income(&snapshot.income);
        let expenses = ExpenseTotals::from_expenses(&snapshot.expenses);
        let debt_payments = monthly_debt_payments(&snapshot.debts);
        let total_monthly_outgoings = expenses.recurring_total() + debt_payments;
        let monthly_surplus = monthly_income - total_monthly_outgoings;
        let health_score = health_score(
            monthly_income,
            monthly_surplus,
            debt_payments,
            &expenses,
            snapshot.emergency_fund.current,
        );
        Self {
            monthly_income,
            expenses,
            debt_payments,
            total_monthly_outgoings,
            monthly_surplus,
            health_score,
            health_band: HealthBand::from_score(health_score),
        }
    }
}

/// 0..=100 score; starts at 100 and is adjusted by a handful of ratio checks.
pub fn health_score(
    monthly_income: f64,
    monthly_surplus: f64,
    debt_payments: f64,
    expenses: &ExpenseTotals,
    emergency_fund: f64,
) -> u8 {
    let mut score: i32 = 100;
    if monthly_surplus < 0.0 {
        score -= 30;
    }
    if debt_payments > monthly_income * 0.3 {
        score -= 20;
    }
    if emergency_fund < expenses.fixed * 3.0 {
        score -= 15;
    }
    if expenses.discretionary > monthly_income * 0.2 {
        score -= 10;
    }
    if monthly_surplus > monthly_income * 0.2 {
        score += 15;
    }
    score.clamp(0, 100) as u8
}
