//! Round Phases
//!
//! Each phase is a total function over the ordered balance list. The engine
//! runs them in order: tax, loan, pairing, dice roll, exchange, repayment.

pub mod tax;
pub mod loan;
pub mod pairing;
pub mod dice;
pub mod exchange;

pub use tax::{pay_tax, TaxSummary};
pub use loan::{advance_loan, repay_loan};
pub use pairing::{draw_pairs, Pair};
pub use dice::{outcome_weights, roll_outcome, roll_outcomes, Outcome};
pub use exchange::settle;
