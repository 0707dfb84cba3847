use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Fixed,
    Variable,
    Discretionary,
    TwentyEightDayCycle,
    OneOff,
}

impl ExpenseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Fixed => "Fixed",
            ExpenseCategory::Variable => "Variable",
            ExpenseCategory::Discretionary => "Discretionary",
            ExpenseCategory::TwentyEightDayCycle => "28-Day Cycle",
            ExpenseCategory::OneOff => "One-Off",
        }
    }
}

/// Schedule attached to an expense. The shape depends on the category.
///
/// `None` fields mean the item has not been scheduled yet; the expander skips it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "category")]
pub enum RecurrenceRule {
    Fixed {
        #[serde(default)]
        due_day: Option<u32>,
    },
    Variable {
        #[serde(default)]
        due_day: Option<u32>,
    },
    Discretionary,
    TwentyEightDayCycle {
        #[serde(default)]
        anchor: Option<NaiveDate>,
    },
    OneOff {
        #[serde(default)]
        due_date: Option<NaiveDate>,
    },
}

impl RecurrenceRule {
    pub fn category(&self) -> ExpenseCategory {
        match self {
            RecurrenceRule::Fixed { .. } => ExpenseCategory::Fixed,
            RecurrenceRule::Variable { .. } => ExpenseCategory::Variable,
            RecurrenceRule::Discretionary => ExpenseCategory::Discretionary,
            RecurrenceRule::TwentyEightDayCycle { .. } => ExpenseCategory::TwentyEightDayCycle,
            RecurrenceRule::OneOff { .. } => ExpenseCategory::OneOff,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseItem {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(flatten)]
    pub rule: RecurrenceRule,
}

impl ExpenseItem {
    pub fn new(name: impl Into<String>, amount: f64, rule: RecurrenceRule) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            rule,
        }
    }

    pub fn fixed(name: impl Into<String>, amount: f64, due_day: u32) -> Self {
        Self::new(
            name,
            amount,
            RecurrenceRule::Fixed {
                due_day: Some(due_day),
            },
        )
    }

    pub fn variable(name: impl Into<String>, amount: f64, due_day: u32) -> Self {
        Self::new(
            name,
            amount,
            RecurrenceRule::Variable {
                due_day: Some(due_day),
            },
        )
    }

    pub fn discretionary(name: impl Into<String>, amount: f64) -> Self {
        Self::new(name, amount, RecurrenceRule::Discretionary)
    }

    pub fn twenty_eight_day(name: impl Into<String>, amount: f64, anchor: NaiveDate) -> Self {
        Self::new(
            name,
            amount,
            RecurrenceRule::TwentyEightDayCycle {
                anchor: Some(anchor),
            },
        )
    }

    pub fn one_off(name: impl Into<String>, amount: f64, due_date: NaiveDate) -> Self {
        Self::new(
            name,
            amount,
            RecurrenceRule::OneOff {
                due_date: Some(due_date),
            },
        )
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn category(&self) -> ExpenseCategory {
        self.rule.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_rule_inline_with_category_tag() {
        let item = ExpenseItem::fixed("Rent", 1200.0, 1).with_id(Uuid::nil());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "Fixed");
        assert_eq!(json["due_day"], 1);

        let parsed: ExpenseItem = serde_json::from_value(serde_json::json!({
            "id": Uuid::nil(),
            "name": "Phone",
            "amount": 30.0,
            "category": "TwentyEightDayCycle"
        }))
        .unwrap();
        assert_eq!(
            parsed.rule,
            RecurrenceRule::TwentyEightDayCycle { anchor: None }
        );
    }
}
