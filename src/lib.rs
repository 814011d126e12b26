//! Group Expense Engine Library
//! # Overview
//!
//! This library records shared expenses among a group and computes each
//! person's net balance: positive means the person is owed money, negative
//! means the person owes.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, RawTransaction, Balances, errors)
//! - [`core`] - Business logic components:
//!   - [`core::validator`] - Candidate validation
//!   - [`core::ledger`] - Append-only transaction storage
//!   - [`core::calculator`] - Accumulation, rounding and residual correction
//!   - [`core::engine`] - Batch submission orchestration
//!   - [`core::shared`] - Engine handle for concurrent callers
//! - [`api`] - Tool-call dispatch and the free-text extractor seam
//! - [`io`] - CSV/JSON input and balance output
//! - [`strategy`] - File-driven processing pipelines (sync and async)
//! - [`cli`] - CLI arguments parsing
//! - [`telemetry`] - tracing setup
//!
//! # Balance rules
//!
//! - The payer is credited the full amount
//! - Each receiver is debited `amount / receivers.len()`, once per listing
//! - Balances are rounded half-up to cents, then any residual cent is moved
//!   onto the largest creditor (or debtor) so the total is exactly zero
//!
//! ```
//! use group_expense_engine::{BalanceEngine, RawTransaction};
//! use rust_decimal::Decimal;
//!
//! let mut engine = BalanceEngine::new();
//! engine
//!     .submit_batch(&[RawTransaction::new("Alice", "10.00", ["Alice", "Bob"])])
//!     .unwrap();
//!
//! let balances = engine.balances();
//! assert_eq!(balances.get("Alice"), Some(Decimal::new(500, 2)));
//! assert_eq!(balances.get("Bob"), Some(Decimal::new(-500, 2)));
//! ```

// Module declarations
pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod telemetry;
pub mod types;

pub use api::{handle_tool_call, submit_text, ToolCall, ToolResponse, TransactionExtractor};
pub use core::{compute_balances, BalanceEngine, ExpenseLedger, SharedEngine};
pub use io::{write_balances, InputFormat, OutputFormat};
pub use types::{
    Balances, ExpenseError, PersonId, RawTransaction, Transaction, ValidationError, MAX_AMOUNT,
};
