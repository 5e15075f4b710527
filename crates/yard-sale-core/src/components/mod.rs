//! Simulation Components
//!
//! The wealth ledger and currency helpers.

pub mod ledger;
pub mod money;

pub use ledger::WealthLedger;
pub use money::{floor_cents, round_cents};
