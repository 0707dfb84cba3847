use std::path::{Path, PathBuf};

use tracing::debug;

use super::LedgerRepository;
use crate::domain::BillPaymentLedger;
use crate::errors::Result;
use crate::utils::persistence::{read_json_or_default, write_json_atomic};

/// Bill payment ledger kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerRepository for JsonLedgerStore {
    fn load_ledger(&self) -> Result<BillPaymentLedger> {
        let ledger: BillPaymentLedger = read_json_or_default(&self.path)?;
        debug!(path = %self.path.display(), empty = ledger.is_empty(), "loaded payment ledger");
        Ok(ledger)
    }

    fn save_ledger(&self, ledger: &BillPaymentLedger) -> Result<()> {
        write_json_atomic(ledger, &self.path)?;
        debug!(path = %self.path.display(), "saved payment ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillId, YearMonth};
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn missing_file_is_an_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("payments.json"));
        assert!(store.load_ledger().unwrap().is_empty());
    }

    #[test]
    fn saved_ledger_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("payments.json"));
        let month = YearMonth::new(2024, 3).unwrap();
        let bill = BillId::fixed(Uuid::new_v4());
        let mut ledger = BillPaymentLedger::new();
        ledger.set_paid(month, bill.clone(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());

        store.save_ledger(&ledger).unwrap();
        let reloaded = store.load_ledger().unwrap();
        assert!(reloaded.is_paid(month, &bill));
        assert_eq!(reloaded, ledger);
    }
}
