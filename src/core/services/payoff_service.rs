use tracing::instrument;

use crate::config::EngineConfig;
use crate::domain::BudgetSnapshot;
use crate::payoff::{compare_strategies, simulate_payoff, PayoffPlan, PayoffStrategy};

use super::{ServiceError, ServiceResult};

pub struct PayoffService;

impl PayoffService {
    #[instrument(skip_all, fields(strategy = strategy.label(), extra = extra))]
    pub fn plan(
        snapshot: &BudgetSnapshot,
        config: &EngineConfig,
        strategy: PayoffStrategy,
        extra: f64,
    ) -> ServiceResult<PayoffPlan> {
        validate_extra(extra)?;
        Ok(simulate_payoff(
            &snapshot.debts,
            strategy,
            extra,
            config.payoff_month_cap,
        ))
    }

    /// Avalanche and snowball plans side by side.
    #[instrument(skip_all, fields(extra = extra))]
    pub fn compare(
        snapshot: &BudgetSnapshot,
        config: &EngineConfig,
        extra: f64,
    ) -> ServiceResult<(PayoffPlan, PayoffPlan)> {
        validate_extra(extra)?;
        Ok(compare_strategies(
            &snapshot.debts,
            extra,
            config.payoff_month_cap,
        ))
    }
}

fn validate_extra(extra: f64) -> ServiceResult<()> {
    if !extra.is_finite() || extra < 0.0 {
        return Err(ServiceError::Invalid(format!(
            "extra monthly payment must be a non-negative amount, got {}",
            extra
        )));
    }
    Ok(())
}
