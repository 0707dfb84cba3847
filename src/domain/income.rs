use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

pub const DEFAULT_PAY_PERIOD_DAYS: u32 = 14;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AmountBasis {
    #[default]
    Net,
    Gross,
}

/// Pay parameters. All pay dates are generated by stepping `pay_period_days`
/// forwards and backwards from `next_pay_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeProfile {
    pub amount_per_period: f64,
    #[serde(default)]
    pub basis: AmountBasis,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub next_pay_date: Option<NaiveDate>,
    #[serde(default = "IncomeProfile::default_period_days")]
    pub pay_period_days: u32,
}

impl IncomeProfile {
    pub fn net(amount_per_period: f64, next_pay_date: NaiveDate) -> Self {
        Self {
            amount_per_period,
            basis: AmountBasis::Net,
            tax_rate: 0.0,
            next_pay_date: Some(next_pay_date),
            pay_period_days: DEFAULT_PAY_PERIOD_DAYS,
        }
    }

    pub fn gross(amount_per_period: f64, tax_rate: f64, next_pay_date: NaiveDate) -> Self {
        Self {
            amount_per_period,
            basis: AmountBasis::Gross,
            tax_rate,
            next_pay_date: Some(next_pay_date),
            pay_period_days: DEFAULT_PAY_PERIOD_DAYS,
        }
    }

    /// Profile with no pay periods configured.
    pub fn none() -> Self {
        Self {
            amount_per_period: 0.0,
            basis: AmountBasis::Net,
            tax_rate: 0.0,
            next_pay_date: None,
            pay_period_days: DEFAULT_PAY_PERIOD_DAYS,
        }
    }

    fn default_period_days() -> u32 {
        DEFAULT_PAY_PERIOD_DAYS
    }

    /// Take-home amount deposited on each pay date.
    pub fn net_per_period(&self) -> f64 {
        match self.basis {
            AmountBasis::Net => self.amount_per_period,
            AmountBasis::Gross => self.amount_per_period * (1.0 - self.tax_rate.clamp(0.0, 1.0)),
        }
    }

    /// Pay schedule anchor, or `None` when no pay dates can be generated.
    pub fn schedule_anchor(&self) -> Option<NaiveDate> {
        if self.pay_period_days == 0 {
            return None;
        }
        self.next_pay_date
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.pay_period_days == 0 {
            return Err(EngineError::InvalidInput(
                "pay period must be at least one day".into(),
            ));
        }
        if self.amount_per_period < 0.0 {
            return Err(EngineError::InvalidInput(
                "income per period cannot be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(EngineError::InvalidInput(format!(
                "tax rate {} must be a fraction between 0 and 1",
                self.tax_rate
            )));
        }
        Ok(())
    }
}

impl Default for IncomeProfile {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gross_income_applies_tax_rate() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let income = IncomeProfile::gross(2000.0, 0.25, date);
        assert!((income.net_per_period() - 1500.0).abs() < 1e-9);

        let net = IncomeProfile::net(1000.0, date);
        assert_eq!(net.net_per_period(), 1000.0);
    }

    #[test]
    fn zero_period_has_no_schedule() {
        let mut income = IncomeProfile::net(1000.0, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        income.pay_period_days = 0;
        assert!(income.schedule_anchor().is_none());
        assert!(income.validate().is_err());
    }
}
