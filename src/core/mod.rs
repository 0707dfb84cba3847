//! Facades that pair the pure engine with a ledger repository.

pub mod services;
