//! Recurrence expansion: turns expense, debt and income definitions into dated events.

pub mod expander;
pub mod occurrence;
pub mod pay_dates;

pub use expander::{
    cycle_dates_between, expand_occurrences, expand_range, ExpansionOptions, OneOffPolicy,
    CYCLE_DAYS, DEFAULT_DUE_SOON_DAYS,
};
pub use occurrence::{BillCategory, BillOccurrence, OccurrenceSource, ScheduledStatus};
pub use pay_dates::{
    next_pay_after, pay_dates_between, pay_dates_for_month, three_paycheck_months,
    upcoming_pay_dates,
};
