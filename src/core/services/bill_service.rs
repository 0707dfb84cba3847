use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::domain::{BillId, BudgetSnapshot, YearMonth};
use crate::schedule::{expand_occurrences, BillOccurrence, ExpansionOptions};
use crate::storage::LedgerRepository;

use super::ServiceResult;

pub struct BillService;

impl BillService {
    /// Occurrences for `month` with paid state taken from the repository's ledger.
    #[instrument(skip_all, fields(month = %month))]
    pub fn bills_for_month(
        repo: &dyn LedgerRepository,
        snapshot: &BudgetSnapshot,
        month: YearMonth,
        options: &ExpansionOptions,
    ) -> ServiceResult<Vec<BillOccurrence>> {
        let ledger = repo.load_ledger()?;
        Ok(expand_occurrences(
            &snapshot.expenses,
            &snapshot.debts,
            month,
            snapshot.effective_tracking_start(),
            &ledger,
            options,
        ))
    }

    /// Flips the paid flag and persists it. Returns the new state.
    #[instrument(skip_all, fields(month = %month, bill = %bill_id))]
    pub fn toggle_paid(
        repo: &dyn LedgerRepository,
        month: YearMonth,
        bill_id: &BillId,
        today: NaiveDate,
    ) -> ServiceResult<bool> {
        let mut ledger = repo.load_ledger()?;
        let paid = ledger.toggle(month, bill_id.clone(), today);
        repo.save_ledger(&ledger)?;
        info!(paid, "toggled bill payment");
        Ok(paid)
    }

    #[instrument(skip_all, fields(month = %month, bill = %bill_id))]
    pub fn mark_paid(
        repo: &dyn LedgerRepository,
        month: YearMonth,
        bill_id: &BillId,
        paid_on: NaiveDate,
    ) -> ServiceResult<()> {
        let mut ledger = repo.load_ledger()?;
        ledger.set_paid(month, bill_id.clone(), paid_on);
        repo.save_ledger(&ledger)?;
        Ok(())
    }

    #[instrument(skip_all, fields(month = %month, bill = %bill_id))]
    pub fn mark_unpaid(
        repo: &dyn LedgerRepository,
        month: YearMonth,
        bill_id: &BillId,
    ) -> ServiceResult<()> {
        let mut ledger = repo.load_ledger()?;
        ledger.set_unpaid(month, bill_id.clone());
        repo.save_ledger(&ledger)?;
        Ok(())
    }
}
