#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use cashflow_core::domain::{
    BudgetSnapshot, Debt, ExpenseItem, IncomeProfile, YearMonth,
};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: OnceLock<Mutex<Vec<TempDir>>> = OnceLock::new();

/// Creates a unique directory that is cleaned up when the test binary exits.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS
        .get_or_init(|| Mutex::new(Vec::new()))
        .lock()
        .expect("lock temp dir registry")
        .push(temp);
    path
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn month(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("valid month")
}

/// Fortnightly pay of 1000 from 2024-01-05 and rent of 1200 on the 1st.
pub fn rent_and_pay_snapshot() -> BudgetSnapshot {
    let mut snapshot = BudgetSnapshot::new(IncomeProfile::net(1000.0, date(2024, 1, 5)), 0.0);
    snapshot.expenses.push(ExpenseItem::fixed("Rent", 1200.0, 1));
    snapshot
}

/// A fuller household: every scheduled category plus two debts, tracked from 2024-01-01.
pub fn household_snapshot() -> BudgetSnapshot {
    let mut snapshot = BudgetSnapshot::new(IncomeProfile::net(1400.0, date(2024, 1, 12)), 500.0);
    snapshot.tracking_start = Some(date(2024, 1, 1));
    snapshot.expenses = vec![
        ExpenseItem::fixed("Rent", 1100.0, 1),
        ExpenseItem::fixed("Insurance", 45.0, 31),
        ExpenseItem::variable("Energy", 120.0, 18),
        ExpenseItem::discretionary("Dining out", 200.0),
        ExpenseItem::twenty_eight_day("Phone", 28.0, date(2024, 1, 3)),
        ExpenseItem::one_off("Car service", 310.0, date(2024, 4, 22)),
    ];
    snapshot.debts = vec![
        Debt::new("Credit card", 2400.0, 22.9, 75.0).due_on(28),
        Debt::new("Car loan", 6000.0, 6.5, 180.0).due_on(10),
    ];
    snapshot
}

/// Two debts where the higher-rate one carries the larger balance.
pub fn avalanche_debts() -> Vec<Debt> {
    vec![
        Debt::new("A", 1000.0, 20.0, 50.0),
        Debt::new("B", 500.0, 10.0, 30.0),
    ]
}
