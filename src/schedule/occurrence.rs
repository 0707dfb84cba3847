use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BillId, ExpenseCategory};

/// Category of a dated obligation. Discretionary spending is never scheduled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BillCategory {
    Fixed,
    Variable,
    TwentyEightDayCycle,
    OneOff,
    Debt,
}

impl BillCategory {
    pub fn from_expense(category: ExpenseCategory) -> Option<Self> {
        match category {
            ExpenseCategory::Fixed => Some(BillCategory::Fixed),
            ExpenseCategory::Variable => Some(BillCategory::Variable),
            ExpenseCategory::TwentyEightDayCycle => Some(BillCategory::TwentyEightDayCycle),
            ExpenseCategory::OneOff => Some(BillCategory::OneOff),
            ExpenseCategory::Discretionary => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OccurrenceSource {
    Expense(Uuid),
    Debt(Uuid),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduledStatus {
    Paid,
    Overdue,
    DueSoon,
    Upcoming,
}

impl ScheduledStatus {
    pub fn classify(
        due: NaiveDate,
        is_paid: bool,
        reference: NaiveDate,
        due_soon_days: i64,
    ) -> ScheduledStatus {
        if is_paid {
            return ScheduledStatus::Paid;
        }
        if due < reference {
            return ScheduledStatus::Overdue;
        }
        let due_soon_cutoff = Duration::try_days(due_soon_days)
            .and_then(|window| reference.checked_add_signed(window));
        match due_soon_cutoff {
            Some(cutoff) if due <= cutoff => ScheduledStatus::DueSoon,
            _ => ScheduledStatus::Upcoming,
        }
    }
}

/// A concrete dated instance of an expense or debt payment. Derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillOccurrence {
    pub bill_id: BillId,
    pub source: OccurrenceSource,
    pub category: BillCategory,
    pub label: String,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub is_paid: bool,
    pub paid_date: Option<NaiveDate>,
    pub status: ScheduledStatus,
}

impl BillOccurrence {
    /// Amount still expected to leave the account.
    pub fn outstanding(&self) -> f64 {
        if self.is_paid {
            0.0
        } else {
            self.amount
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_due_soon_window_does_not_overflow() {
        let reference = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            ScheduledStatus::classify(due, false, reference, 100_000_000),
            ScheduledStatus::Upcoming
        );
        assert_eq!(
            ScheduledStatus::classify(due, false, reference, i64::MAX),
            ScheduledStatus::Upcoming
        );
        assert_eq!(
            ScheduledStatus::classify(due, false, reference, 366),
            ScheduledStatus::DueSoon
        );
    }

    #[test]
    fn classifies_against_reference() {
        let reference = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        assert_eq!(
            ScheduledStatus::classify(day(9), false, reference, 3),
            ScheduledStatus::Overdue
        );
        assert_eq!(
            ScheduledStatus::classify(day(13), false, reference, 3),
            ScheduledStatus::DueSoon
        );
        assert_eq!(
            ScheduledStatus::classify(day(14), false, reference, 3),
            ScheduledStatus::Upcoming
        );
        assert_eq!(
            ScheduledStatus::classify(day(1), true, reference, 3),
            ScheduledStatus::Paid
        );
    }
}
