pub mod json_backend;
pub mod memory;

use std::path::Path;

use tracing::debug;

use crate::domain::{BillPaymentLedger, BudgetSnapshot};
use crate::errors::Result;
use crate::utils::persistence::{read_json, write_json_atomic};

/// Persistence seam for the bill payment ledger.
///
/// The engine functions never call this; only the service layer does.
pub trait LedgerRepository: Send + Sync {
    fn load_ledger(&self) -> Result<BillPaymentLedger>;
    fn save_ledger(&self, ledger: &BillPaymentLedger) -> Result<()>;
}

pub use json_backend::JsonLedgerStore;
pub use memory::InMemoryLedgerStore;

pub fn load_snapshot_from_path(path: &Path) -> Result<BudgetSnapshot> {
    let snapshot: BudgetSnapshot = read_json(path)?;
    snapshot.validate()?;
    debug!(
        path = %path.display(),
        expenses = snapshot.expenses.len(),
        debts = snapshot.debts.len(),
        "loaded budget snapshot"
    );
    Ok(snapshot)
}

pub fn save_snapshot_to_path(snapshot: &BudgetSnapshot, path: &Path) -> Result<()> {
    write_json_atomic(snapshot, path)
}
