//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: validated and raw transaction records
//! - `balance`: the per-person balance mapping
//! - `error`: error types for validation and submission

pub mod balance;
pub mod error;
pub mod transaction;

pub use balance::Balances;
pub use error::{ErrorCategory, ExpenseError, ValidationError};
pub use transaction::{PersonId, RawTransaction, Transaction, MAX_AMOUNT};
