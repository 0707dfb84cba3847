use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::BillId;
use crate::schedule::{BillCategory, BillOccurrence};

pub const PAY_EVENT_LABEL: &str = "Fortnightly Pay";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub is_incoming: bool,
    pub amount: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<BillId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<BillCategory>,
    #[serde(default)]
    pub is_paid: bool,
}

impl CalendarEvent {
    pub fn pay(date: NaiveDate, amount: f64) -> Self {
        Self {
            date,
            is_incoming: true,
            amount,
            label: PAY_EVENT_LABEL.to_string(),
            bill_id: None,
            category: None,
            is_paid: false,
        }
    }

    pub fn bill(occurrence: &BillOccurrence) -> Self {
        Self {
            date: occurrence.due_date,
            is_incoming: false,
            amount: occurrence.amount,
            label: occurrence.label.clone(),
            bill_id: Some(occurrence.bill_id.clone()),
            category: Some(occurrence.category),
            is_paid: occurrence.is_paid,
        }
    }

    /// Signed effect on the running balance. Paid bills are already settled.
    pub fn balance_effect(&self) -> f64 {
        if self.is_incoming {
            self.amount
        } else if self.is_paid {
            0.0
        } else {
            -self.amount
        }
    }
}

/// All events that share one calendar date, in merge order (pay first, then bills).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayEvents {
    pub events: Vec<CalendarEvent>,
}

impl DayEvents {
    pub fn income(&self) -> f64 {
        self.events
            .iter()
            .filter(|event| event.is_incoming)
            .map(|event| event.amount)
            .sum()
    }

    /// Outgoings that still move the balance.
    pub fn unpaid_outgoings(&self) -> f64 {
        self.events
            .iter()
            .filter(|event| !event.is_incoming && !event.is_paid)
            .map(|event| event.amount)
            .sum()
    }

    /// Aggregated delta applied to the running balance for the day.
    pub fn net_delta(&self) -> f64 {
        self.income() - self.unpaid_outgoings()
    }
}

/// Merges pay dates and occurrences into a date-ordered map of grouped events.
pub fn merge_events(
    pay_dates: &[NaiveDate],
    pay_amount: f64,
    occurrences: &[BillOccurrence],
) -> BTreeMap<NaiveDate, DayEvents> {
    let mut grouped: BTreeMap<NaiveDate, DayEvents> = BTreeMap::new();
    for date in pay_dates {
        grouped
            .entry(*date)
            .or_default()
            .events
            .push(CalendarEvent::pay(*date, pay_amount));
    }
    for occurrence in occurrences {
        grouped
            .entry(occurrence.due_date)
            .or_default()
            .events
            .push(CalendarEvent::bill(occurrence));
    }
    grouped
}
