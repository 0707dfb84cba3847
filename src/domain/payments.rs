use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::YearMonth;

/// Deterministic identifier of a bill occurrence.
///
/// Rebuilding the occurrence list from scratch must yield the same ids, so the
/// only way to build one is from the source id (plus the due date for 28-day items).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(String);

impl BillId {
    pub fn fixed(expense_id: Uuid) -> Self {
        Self(format!("fixed-{}", expense_id))
    }

    pub fn variable(expense_id: Uuid) -> Self {
        Self(format!("variable-{}", expense_id))
    }

    pub fn twenty_eight_day(expense_id: Uuid, due: NaiveDate) -> Self {
        Self(format!("28day-{}-{}", expense_id, due.format("%Y-%m-%d")))
    }

    pub fn one_off(expense_id: Uuid) -> Self {
        Self(format!("oneoff-{}", expense_id))
    }

    pub fn debt(debt_id: Uuid) -> Self {
        Self(format!("debt-{}", debt_id))
    }

    /// Wraps an id read back from an external store.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRecord {
    pub bill_id: BillId,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

/// Persisted paid/unpaid status, keyed by `YYYY-MM` month key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BillPaymentLedger {
    months: BTreeMap<String, Vec<PaymentRecord>>,
}

impl BillPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, month: YearMonth, bill_id: &BillId) -> Option<&PaymentRecord> {
        self.months
            .get(&month.key())
            .and_then(|records| records.iter().find(|record| &record.bill_id == bill_id))
    }

    pub fn is_paid(&self, month: YearMonth, bill_id: &BillId) -> bool {
        self.lookup(month, bill_id)
            .map(|record| record.is_paid)
            .unwrap_or(false)
    }

    pub fn set_paid(&mut self, month: YearMonth, bill_id: BillId, paid_on: NaiveDate) {
        self.upsert(
            month,
            PaymentRecord {
                bill_id,
                is_paid: true,
                paid_date: Some(paid_on),
            },
        );
    }

    pub fn set_unpaid(&mut self, month: YearMonth, bill_id: BillId) {
        self.upsert(
            month,
            PaymentRecord {
                bill_id,
                is_paid: false,
                paid_date: None,
            },
        );
    }

    /// Flips the paid flag, returning the new state. Paying stamps `today`.
    pub fn toggle(&mut self, month: YearMonth, bill_id: BillId, today: NaiveDate) -> bool {
        if self.is_paid(month, &bill_id) {
            self.set_unpaid(month, bill_id);
            false
        } else {
            self.set_paid(month, bill_id, today);
            true
        }
    }

    pub fn records_for(&self, month: YearMonth) -> &[PaymentRecord] {
        self.months
            .get(&month.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.months.values().all(Vec::is_empty)
    }

    fn upsert(&mut self, month: YearMonth, record: PaymentRecord) {
        let records = self.months.entry(month.key()).or_default();
        match records
            .iter_mut()
            .find(|existing| existing.bill_id == record.bill_id)
        {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }
}
