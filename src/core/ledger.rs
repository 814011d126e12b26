//! Append-only transaction ledger
//!
//! The ledger is the only state the engine keeps. Balances are always derived
//! from it from scratch, so it never needs to support updates or deletes.

use crate::types::Transaction;

/// Ordered record of accepted transactions
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
        }
    }

    /// Append a validated transaction, returning a reference to it
    pub fn append(&mut self, transaction: Transaction) -> &Transaction {
        self.transactions.push(transaction);
        &self.transactions[self.transactions.len() - 1]
    }

    /// All accepted transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
