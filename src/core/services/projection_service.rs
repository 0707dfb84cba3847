use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::domain::{BudgetSnapshot, YearMonth};
use crate::projection::{CashFlowProjector, MonthProjection};
use crate::storage::LedgerRepository;

use super::{ServiceError, ServiceResult};

pub struct ProjectionService;

impl ProjectionService {
    /// Projects one month. `reference` is "today" for bill status classification.
    #[instrument(skip_all, fields(month = %month))]
    pub fn month(
        repo: &dyn LedgerRepository,
        snapshot: &BudgetSnapshot,
        config: &EngineConfig,
        month: YearMonth,
        reference: NaiveDate,
    ) -> ServiceResult<MonthProjection> {
        let ledger = repo.load_ledger()?;
        let projector = CashFlowProjector::new(snapshot, &ledger)
            .with_thresholds(config.thresholds())
            .with_options(config.expansion_options(reference));
        let projection = projector.project_month(month);
        debug!(
            opening = projection.opening_balance,
            closing = projection.closing_balance,
            "month projected"
        );
        Ok(projection)
    }

    #[instrument(skip_all, fields(from = %from, to = %to))]
    pub fn range(
        repo: &dyn LedgerRepository,
        snapshot: &BudgetSnapshot,
        config: &EngineConfig,
        from: YearMonth,
        to: YearMonth,
        reference: NaiveDate,
    ) -> ServiceResult<Vec<MonthProjection>> {
        if to < from {
            return Err(ServiceError::Invalid(format!(
                "projection range ends ({}) before it starts ({})",
                to, from
            )));
        }
        let ledger = repo.load_ledger()?;
        let projector = CashFlowProjector::new(snapshot, &ledger)
            .with_thresholds(config.thresholds())
            .with_options(config.expansion_options(reference));
        Ok(projector.project_range(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillId, BillPaymentLedger, ExpenseItem, IncomeProfile};
    use crate::storage::InMemoryLedgerStore;

    fn snapshot() -> (BudgetSnapshot, BillId) {
        let mut snapshot = BudgetSnapshot::new(
            IncomeProfile::net(1000.0, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            0.0,
        );
        snapshot.tracking_start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let rent = ExpenseItem::fixed("Rent", 1200.0, 1);
        let bill = BillId::fixed(rent.id);
        snapshot.expenses.push(rent);
        (snapshot, bill)
    }

    #[test]
    fn paid_bills_in_the_repository_do_not_move_the_balance() {
        let (snapshot, bill) = snapshot();
        let month = YearMonth::new(2024, 1).unwrap();
        let mut ledger = BillPaymentLedger::new();
        ledger.set_paid(month, bill, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let repo = InMemoryLedgerStore::with_ledger(ledger);
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let projection =
            ProjectionService::month(&repo, &snapshot, &EngineConfig::default(), month, reference)
                .unwrap();
        assert_eq!(projection.closing_balance, 2000.0);
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        let (snapshot, _) = snapshot();
        let repo = InMemoryLedgerStore::new();
        let result = ProjectionService::range(
            &repo,
            &snapshot,
            &EngineConfig::default(),
            YearMonth::new(2024, 3).unwrap(),
            YearMonth::new(2024, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(matches!(result, Err(ServiceError::Invalid(_))));
    }
}
