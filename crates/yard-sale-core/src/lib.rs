//! Extended yard sale model: wealth exchange between paired agents under
//! taxation, a wealth-dependent coin bias and a debt floor.

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::WealthLedger;
pub use config::{ConfigError, SaleConfig};
pub use engine::{run_batch, CompletedRun, ModelParams, SnapshotHistory, YardSaleEngine};
pub use error::{ArithmeticError, ConfigurationError, Result, SaleError, ValidationError};
