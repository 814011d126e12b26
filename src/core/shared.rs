//! Thread-safe engine handle
//!
//! [`SharedEngine`] wraps a [`BalanceEngine`] for use behind a concurrent
//! server or from several async tasks.
//!
//! # Architecture
//!
//! ```text
//! SharedEngine (Clone)
//!     └── Arc<Mutex<BalanceEngine>>
//!             └── Ledger
//! ```
//!
//! # Serialization
//!
//! A batch submission holds the lock for the whole batch, and balance
//! computation holds it for the whole read, so a balance request never
//! observes a partially appended batch.

use crate::core::engine::BalanceEngine;
use crate::core::traits::ExpenseLedger;
use crate::types::{Balances, ExpenseError, RawTransaction, Transaction, ValidationError};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, mutex-guarded engine handle
///
/// Every clone refers to the same ledger.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<BalanceEngine>>,
}

impl SharedEngine {
    /// Create a handle around a fresh engine
    pub fn new() -> Self {
        Self::from_engine(BalanceEngine::new())
    }

    /// Share an existing engine
    pub fn from_engine(engine: BalanceEngine) -> Self {
        SharedEngine {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Validate and append a single transaction
    pub fn submit(&self, raw: &RawTransaction) -> Result<Transaction, ValidationError> {
        self.lock().submit(raw).cloned()
    }

    /// Validate and append a batch under a single lock
    pub fn submit_batch(&self, batch: &[RawTransaction]) -> Result<usize, ExpenseError> {
        self.lock().submit_batch(batch)
    }

    /// Handle a submission request payload under a single lock
    pub fn submit_request(&self, payload: &Value) -> Result<usize, ExpenseError> {
        self.lock().submit_request(payload)
    }

    /// Compute balances from a consistent snapshot of the ledger
    pub fn balances(&self) -> Balances {
        self.lock().balances()
    }

    /// Copy of the accepted transactions in submission order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock().transactions().to_vec()
    }

    /// Number of accepted transactions
    pub fn len(&self) -> usize {
        self.lock().ledger().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ledger mutations are single pushes, so a panic in another holder
    /// cannot leave it half-written; keep serving after poisoning.
    fn lock(&self) -> MutexGuard<'_, BalanceEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExpenseLedger for SharedEngine {
    fn submit_batch(&mut self, batch: &[RawTransaction]) -> Result<usize, ExpenseError> {
        SharedEngine::submit_batch(self, batch)
    }

    fn balances(&self) -> Balances {
        SharedEngine::balances(self)
    }

    fn transaction_count(&self) -> usize {
        self.len()
    }
}
