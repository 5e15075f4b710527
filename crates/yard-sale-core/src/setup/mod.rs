//! Population Setup
//!
//! Builds initial wealth ledgers for a simulation.

pub mod population;

pub use population::*;
