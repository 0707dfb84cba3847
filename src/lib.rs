#![doc(test(attr(deny(warnings))))]

//! Cashflow Core projects a pay/bill calendar: it expands recurring obligations into
//! dated occurrences, walks a day-by-day running balance with carry-forward between
//! months, and simulates debt payoff orderings.

pub mod analysis;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod payoff;
pub mod projection;
pub mod schedule;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
