use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Due day used when a debt has no payment day recorded.
pub const DEFAULT_DEBT_DUE_DAY: u32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
    /// Annual percentage rate, e.g. `19.9`.
    pub interest_rate: f64,
    pub minimum_payment: f64,
    #[serde(default)]
    pub payment_due_day: Option<u32>,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        balance: f64,
        interest_rate: f64,
        minimum_payment: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment,
            payment_due_day: None,
        }
    }

    pub fn due_on(mut self, day: u32) -> Self {
        self.payment_due_day = Some(day);
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn due_day(&self) -> u32 {
        self.payment_due_day.unwrap_or(DEFAULT_DEBT_DUE_DAY)
    }

    pub fn monthly_interest(&self) -> f64 {
        self.balance * (self.interest_rate / 100.0) / 12.0
    }
}
