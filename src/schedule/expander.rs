use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::occurrence::{BillCategory, BillOccurrence, OccurrenceSource, ScheduledStatus};
use crate::domain::{
    BillId, BillPaymentLedger, Debt, ExpenseCategory, ExpenseItem, RecurrenceRule, YearMonth,
};

/// Length of a non-calendar billing cycle.
pub const CYCLE_DAYS: i64 = 28;
pub const DEFAULT_DUE_SOON_DAYS: i64 = 3;

/// How one-off expenses dated before the reference date are treated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OneOffPolicy {
    /// Keep them and flag them overdue (unless paid).
    #[default]
    KeepOverdue,
    /// Omit them entirely.
    DropPast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    pub one_off_policy: OneOffPolicy,
    /// "Today" for status classification.
    pub reference_date: NaiveDate,
    pub due_soon_days: i64,
}

impl ExpansionOptions {
    pub fn as_of(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            ..Self::default()
        }
    }

    pub fn with_one_off_policy(mut self, policy: OneOffPolicy) -> Self {
        self.one_off_policy = policy;
        self
    }
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            one_off_policy: OneOffPolicy::KeepOverdue,
            reference_date: NaiveDate::MIN,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
        }
    }
}

/// Concrete obligations due within `month`, with paid state backfilled from the ledger.
///
/// Categories are expanded in a fixed order (fixed, variable, 28-day, one-off, debts)
/// and then stable-sorted by due date, so ties keep that order.
pub fn expand_occurrences(
    expenses: &[ExpenseItem],
    debts: &[Debt],
    month: YearMonth,
    tracking_start: NaiveDate,
    ledger: &BillPaymentLedger,
    options: &ExpansionOptions,
) -> Vec<BillOccurrence> {
    let mut builder = OccurrenceBuilder {
        month,
        tracking_start,
        ledger,
        options,
        items: Vec::new(),
    };

    for category in [ExpenseCategory::Fixed, ExpenseCategory::Variable] {
        for expense in expenses.iter().filter(|e| e.category() == category) {
            builder.monthly_expense(expense);
        }
    }
    for expense in expenses
        .iter()
        .filter(|e| e.category() == ExpenseCategory::TwentyEightDayCycle)
    {
        builder.cycle_expense(expense);
    }
    for expense in expenses
        .iter()
        .filter(|e| e.category() == ExpenseCategory::OneOff)
    {
        builder.one_off_expense(expense);
    }
    for debt in debts {
        builder.debt_payment(debt);
    }

    let mut items = builder.items;
    items.sort_by_key(|item| item.due_date);
    trace!(month = %month, count = items.len(), "expanded occurrences");
    items
}

/// Union of [`expand_occurrences`] over every month in `from..=to`.
pub fn expand_range(
    expenses: &[ExpenseItem],
    debts: &[Debt],
    from: YearMonth,
    to: YearMonth,
    tracking_start: NaiveDate,
    ledger: &BillPaymentLedger,
    options: &ExpansionOptions,
) -> Vec<BillOccurrence> {
    from.iter_through(to)
        .flat_map(|month| expand_occurrences(expenses, debts, month, tracking_start, ledger, options))
        .collect()
}

/// Dates of a 28-day cycle that fall within `[start, end]`, walking forward from `anchor`.
pub fn cycle_dates_between(anchor: NaiveDate, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if anchor > end {
        return dates;
    }
    let behind = (start - anchor).num_days();
    let steps = if behind > 0 {
        (behind + CYCLE_DAYS - 1) / CYCLE_DAYS
    } else {
        0
    };
    let mut current = anchor + Duration::days(steps * CYCLE_DAYS);
    while current <= end {
        dates.push(current);
        current = current + Duration::days(CYCLE_DAYS);
    }
    dates
}

struct OccurrenceBuilder<'a> {
    month: YearMonth,
    tracking_start: NaiveDate,
    ledger: &'a BillPaymentLedger,
    options: &'a ExpansionOptions,
    items: Vec<BillOccurrence>,
}

impl OccurrenceBuilder<'_> {
    fn monthly_expense(&mut self, expense: &ExpenseItem) {
        let (due_day, bill_id, category) = match &expense.rule {
            RecurrenceRule::Fixed { due_day } => {
                (*due_day, BillId::fixed(expense.id), BillCategory::Fixed)
            }
            RecurrenceRule::Variable { due_day } => {
                (*due_day, BillId::variable(expense.id), BillCategory::Variable)
            }
            _ => return,
        };
        let Some(due_day) = due_day else {
            debug!(expense = %expense.name, "skipping expense without a due day");
            return;
        };
        let due = self.month.day_clamped(due_day);
        self.push(
            bill_id,
            OccurrenceSource::Expense(expense.id),
            category,
            expense.name.clone(),
            due,
            expense.amount,
        );
    }

    fn cycle_expense(&mut self, expense: &ExpenseItem) {
        let RecurrenceRule::TwentyEightDayCycle { anchor } = &expense.rule else {
            return;
        };
        let Some(anchor) = anchor else {
            debug!(expense = %expense.name, "skipping 28-day expense without an anchor date");
            return;
        };
        let start = self.month.first_day().max(self.tracking_start);
        for due in cycle_dates_between(*anchor, start, self.month.last_day()) {
            self.push(
                BillId::twenty_eight_day(expense.id, due),
                OccurrenceSource::Expense(expense.id),
                BillCategory::TwentyEightDayCycle,
                format!("{} (28-day)", expense.name),
                due,
                expense.amount,
            );
        }
    }

    fn one_off_expense(&mut self, expense: &ExpenseItem) {
        let RecurrenceRule::OneOff { due_date } = &expense.rule else {
            return;
        };
        let Some(due) = due_date else {
            debug!(expense = %expense.name, "skipping one-off expense without a date");
            return;
        };
        if !self.month.contains(*due) {
            return;
        }
        if self.options.one_off_policy == OneOffPolicy::DropPast
            && *due < self.options.reference_date
        {
            trace!(expense = %expense.name, "dropping past one-off");
            return;
        }
        self.push(
            BillId::one_off(expense.id),
            OccurrenceSource::Expense(expense.id),
            BillCategory::OneOff,
            expense.name.clone(),
            *due,
            expense.amount,
        );
    }

    fn debt_payment(&mut self, debt: &Debt) {
        let due = self.month.day_clamped(debt.due_day());
        self.push(
            BillId::debt(debt.id),
            OccurrenceSource::Debt(debt.id),
            BillCategory::Debt,
            format!("{} Payment", debt.name),
            due,
            debt.minimum_payment,
        );
    }

    fn push(
        &mut self,
        bill_id: BillId,
        source: OccurrenceSource,
        category: BillCategory,
        label: String,
        due_date: NaiveDate,
        amount: f64,
    ) {
        if due_date < self.tracking_start {
            return;
        }
        let record = self
            .ledger
            .lookup(YearMonth::from_date(due_date), &bill_id);
        let is_paid = record.map(|r| r.is_paid).unwrap_or(false);
        let paid_date = record.filter(|r| r.is_paid).and_then(|r| r.paid_date);
        let status = ScheduledStatus::classify(
            due_date,
            is_paid,
            self.options.reference_date,
            self.options.due_soon_days,
        );
        self.items.push(BillOccurrence {
            bill_id,
            source,
            category,
            label,
            due_date,
            amount,
            is_paid,
            paid_date,
            status,
        });
    }
}
