//! Core trait for expense engines
//!
//! This module defines the abstraction that lets the single-owner
//! [`BalanceEngine`](crate::core::BalanceEngine) and the mutex-guarded
//! [`SharedEngine`](crate::core::SharedEngine) be driven by the same
//! collaborators (tool dispatch, text ingestion).

use crate::types::{Balances, ExpenseError, RawTransaction};

/// The two operations collaborators use: submit transactions and read balances
pub trait ExpenseLedger {
    /// Validate and append a batch, failing fast at the first invalid element
    ///
    /// Returns the number of transactions appended. On error the elements
    /// before the failing index stay in the ledger.
    fn submit_batch(&mut self, batch: &[RawTransaction]) -> Result<usize, ExpenseError>;

    /// Compute current balances from the whole ledger
    fn balances(&self) -> Balances;

    /// Number of accepted transactions
    fn transaction_count(&self) -> usize;
}
