use std::sync::{PoisonError, RwLock};

use super::LedgerRepository;
use crate::domain::BillPaymentLedger;
use crate::errors::{EngineError, Result};

#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    ledger: RwLock<BillPaymentLedger>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: BillPaymentLedger) -> Self {
        Self {
            ledger: RwLock::new(ledger),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::Storage("in-memory ledger lock poisoned".into())
}

impl LedgerRepository for InMemoryLedgerStore {
    fn load_ledger(&self) -> Result<BillPaymentLedger> {
        Ok(self.ledger.read().map_err(poisoned)?.clone())
    }

    fn save_ledger(&self, ledger: &BillPaymentLedger) -> Result<()> {
        *self.ledger.write().map_err(poisoned)? = ledger.clone();
        Ok(())
    }
}
