//! Core business logic module
//!
//! This module contains the balance computation components:
//! - `traits` - The collaborator-facing `ExpenseLedger` abstraction
//! - `validator` - Candidate transaction validation
//! - `ledger` - Append-only transaction storage
//! - `calculator` - Accumulation, rounding and residual correction
//! - `engine` - `BalanceEngine`, batch submission orchestration
//! - `shared` - Mutex-guarded engine handle for concurrent callers

pub mod calculator;
pub mod engine;
pub mod ledger;
pub mod shared;
pub mod traits;
pub mod validator;

pub use calculator::compute_balances;
pub use engine::BalanceEngine;
pub use ledger::Ledger;
pub use shared::SharedEngine;
pub use traits::ExpenseLedger;
pub use validator::validate;
