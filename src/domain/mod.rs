//! Budget snapshot types consumed by the engine.

pub mod debt;
pub mod expense;
pub mod income;
pub mod month;
pub mod payments;
pub mod snapshot;

pub use debt::{Debt, DEFAULT_DEBT_DUE_DAY};
pub use expense::{ExpenseCategory, ExpenseItem, RecurrenceRule};
pub use income::{AmountBasis, IncomeProfile, DEFAULT_PAY_PERIOD_DAYS};
pub use month::YearMonth;
pub use payments::{BillId, BillPaymentLedger, PaymentRecord};
pub use snapshot::{BudgetSnapshot, EmergencyFund, SavingsGoal};
