use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    debt::Debt,
    expense::ExpenseItem,
    income::IncomeProfile,
    payments::BillPaymentLedger,
};
use crate::errors::EngineError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmergencyFund {
    pub current: f64,
    #[serde(default)]
    pub target: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

/// Everything the engine reads for one projection request.
///
/// The snapshot is treated as immutable for the duration of a call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetSnapshot {
    #[serde(default)]
    pub income: IncomeProfile,
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub emergency_fund: EmergencyFund,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub starting_balance: f64,
    #[serde(default)]
    pub tracking_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "BillPaymentLedger::is_empty")]
    pub bill_payments: BillPaymentLedger,
}

impl BudgetSnapshot {
    pub fn new(income: IncomeProfile, starting_balance: f64) -> Self {
        Self {
            income,
            starting_balance,
            ..Self::default()
        }
    }

    /// Tracking start, falling back to 1900-01-01 when none is recorded.
    pub fn effective_tracking_start(&self) -> NaiveDate {
        self.tracking_start.unwrap_or_else(tracking_start_sentinel)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.income.validate()?;
        for expense in &self.expenses {
            if expense.amount < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "expense `{}` has a negative amount",
                    expense.name
                )));
            }
        }
        for debt in &self.debts {
            if debt.balance < 0.0 || debt.minimum_payment < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "debt `{}` has a negative balance or payment",
                    debt.name
                )));
            }
        }
        Ok(())
    }
}

pub fn tracking_start_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tracking_start_uses_sentinel() {
        let snapshot = BudgetSnapshot::default();
        assert_eq!(
            snapshot.effective_tracking_start(),
            NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
        );
    }

    #[test]
    fn rejects_negative_expense() {
        let mut snapshot = BudgetSnapshot::default();
        snapshot
            .expenses
            .push(ExpenseItem::fixed("Broken", -5.0, 3));
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn deserializes_sparse_snapshot() {
        let snapshot: BudgetSnapshot = serde_json::from_str(r#"{"starting_balance": 250.0}"#).unwrap();
        assert_eq!(snapshot.starting_balance, 250.0);
        assert!(snapshot.income.next_pay_date.is_none());
        assert!(snapshot.bill_payments.is_empty());
    }
}
