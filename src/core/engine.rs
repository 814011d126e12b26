//! Balance engine
//!
//! This module provides the [`BalanceEngine`] that owns the ledger and exposes
//! the two collaborator operations: submitting transactions and computing
//! balances.
//!
//! # Batch semantics
//!
//! Batches are validated element by element and each valid element is
//! appended immediately. The first invalid element aborts the batch and is
//! reported with its index; elements before it remain in the ledger.

use crate::core::calculator::compute_balances;
use crate::core::ledger::Ledger;
use crate::core::traits::ExpenseLedger;
use crate::core::validator::validate;
use crate::types::{Balances, ExpenseError, RawTransaction, Transaction, ValidationError};
use serde_json::Value;
use tracing::debug;

/// Key under which a submission request carries its transactions
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Expense tracking engine
///
/// Holds no state other than the ledger; balances are recomputed on every
/// request. Construct one per process (or per group) and hand it to whatever
/// serves requests.
#[derive(Debug, Clone, Default)]
pub struct BalanceEngine {
    ledger: Ledger,
}

impl BalanceEngine {
    /// Create an engine with an empty ledger
    pub fn new() -> Self {
        BalanceEngine {
            ledger: Ledger::new(),
        }
    }

    /// Validate and append a single transaction
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] describing the first failed check. The
    /// ledger is unchanged in that case.
    pub fn submit(&mut self, raw: &RawTransaction) -> Result<&Transaction, ValidationError> {
        let transaction = validate(raw)?;
        debug!(
            payer = %transaction.payer,
            amount = %transaction.amount,
            receivers = transaction.receivers.len(),
            "transaction accepted"
        );
        Ok(self.ledger.append(transaction))
    }

    /// Validate and append a batch of transactions in order
    ///
    /// # Returns
    ///
    /// The number of transactions appended
    ///
    /// # Errors
    ///
    /// [`ExpenseError::MalformedBatchElement`] with the index of the first
    /// invalid element. Elements before it have been appended.
    pub fn submit_batch(&mut self, batch: &[RawTransaction]) -> Result<usize, ExpenseError> {
        for (index, raw) in batch.iter().enumerate() {
            self.submit(raw)
                .map_err(|source| ExpenseError::malformed(index, source))?;
        }
        Ok(batch.len())
    }

    /// Handle a submission request payload
    ///
    /// Accepts either `{"transactions": [...]}` or a bare JSON array. Elements
    /// that are not objects are rejected with
    /// [`ValidationError::NotARecord`] at their index.
    ///
    /// # Errors
    ///
    /// - [`ExpenseError::InvalidBatch`] if the payload carries no list
    /// - [`ExpenseError::MalformedBatchElement`] as for [`submit_batch`](Self::submit_batch)
    pub fn submit_request(&mut self, payload: &Value) -> Result<usize, ExpenseError> {
        let items = transaction_list(payload)?;

        for (index, item) in items.iter().enumerate() {
            RawTransaction::from_value(item)
                .ok_or(ValidationError::NotARecord)
                .and_then(|raw| self.submit(&raw).map(|_| ()))
                .map_err(|source| ExpenseError::malformed(index, source))?;
        }
        Ok(items.len())
    }

    /// Compute balances over the whole ledger
    pub fn balances(&self) -> Balances {
        compute_balances(self.ledger.transactions())
    }

    /// Accepted transactions in submission order
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Read-only view of the ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl ExpenseLedger for BalanceEngine {
    fn submit_batch(&mut self, batch: &[RawTransaction]) -> Result<usize, ExpenseError> {
        BalanceEngine::submit_batch(self, batch)
    }

    fn balances(&self) -> Balances {
        BalanceEngine::balances(self)
    }

    fn transaction_count(&self) -> usize {
        self.ledger.len()
    }
}

/// Extract the list of candidates from a submission payload
pub(crate) fn transaction_list(payload: &Value) -> Result<&Vec<Value>, ExpenseError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(fields) => match fields.get(TRANSACTIONS_KEY) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(ExpenseError::invalid_batch(
                "'transactions' must be provided as a list",
            )),
            None => Err(ExpenseError::invalid_batch("missing 'transactions' key")),
        },
        _ => Err(ExpenseError::invalid_batch(
            "expected an object with a 'transactions' list",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[test]
    fn test_submit_appends_valid_transaction() {
        let mut engine = BalanceEngine::new();

        let stored = engine
            .submit(&RawTransaction::new("Alice", "10.00", ["Alice", "Bob"]))
            .unwrap();
        assert_eq!(stored.amount, dec("10.00"));
        assert_eq!(engine.transactions().len(), 1);
    }

    #[test]
    fn test_submit_invalid_leaves_ledger_untouched() {
        let mut engine = BalanceEngine::new();

        let result = engine.submit(&RawTransaction::new("Alice", "-10.00", ["Alice", "Bob"]));
        assert!(matches!(
            result,
            Err(ValidationError::NonPositiveAmount { .. })
        ));
        assert!(engine.ledger().is_empty());
    }

    #[test]
    fn test_empty_receivers_never_reach_the_calculator() {
        let mut engine = BalanceEngine::new();
        engine
            .submit(&RawTransaction::new("Bob", "4.00", ["Alice"]))
            .unwrap();

        let result = engine.submit(&RawTransaction::new("Alice", "1.00", Vec::<String>::new()));
        assert_eq!(result.unwrap_err(), ValidationError::EmptyReceivers);

        assert!(engine
            .transactions()
            .iter()
            .all(|t| !t.receivers().is_empty()));
        let balances = engine.balances();
        assert_eq!(balances.get("Alice"), Some(Decimal::new(-400, 2)));
        assert_eq!(balances.get("Bob"), Some(Decimal::new(400, 2)));
    }

    #[test]
    fn test_submit_batch_in_order() {
        let mut engine = BalanceEngine::new();

        let added = engine
            .submit_batch(&[
                RawTransaction::new("Alice", "10.00", ["Alice", "Bob"]),
                RawTransaction::new("Bob", "20.00", ["Alice", "Bob"]),
            ])
            .unwrap();

        assert_eq!(added, 2);
        let payers: Vec<&str> = engine.transactions().iter().map(|t| t.payer.as_str()).collect();
        assert_eq!(payers, vec!["Alice", "Bob"]);

        let balances = engine.balances();
        assert_eq!(balances.get("Alice"), Some(dec("-5.00")));
        assert_eq!(balances.get("Bob"), Some(dec("5.00")));
    }

    #[test]
    fn test_submit_batch_fails_fast_and_keeps_prior_elements() {
        let mut engine = BalanceEngine::new();

        let result = engine.submit_batch(&[
            RawTransaction::new("Alice", "10.00", ["Alice", "Bob"]),
            RawTransaction::new("Bob", "abc", ["Alice"]),
            RawTransaction::new("Carol", "5.00", ["Alice"]),
        ]);

        assert_eq!(
            result,
            Err(ExpenseError::malformed(
                1,
                ValidationError::InvalidAmount {
                    value: "\"abc\"".to_string()
                }
            ))
        );
        assert_eq!(engine.transactions().len(), 1);
        assert_eq!(engine.transactions()[0].payer, "Alice");
    }

    #[test]
    fn test_submit_request_with_transactions_key() {
        let mut engine = BalanceEngine::new();

        let added = engine
            .submit_request(&json!({
                "transactions": [
                    {"payer": "Alice", "amount": "30.00", "receivers": ["Alice", "Bob", "Charlie"],
                     "description": "Lunch"},
                    {"payer": "Bob", "amount": "10.00", "receivers": ["Alice"]}
                ]
            }))
            .unwrap();

        assert_eq!(added, 2);
        let balances = engine.balances();
        assert_eq!(balances.get("Alice"), Some(dec("10.00")));
        assert_eq!(balances.get("Bob"), Some(dec("0.00")));
        assert_eq!(balances.get("Charlie"), Some(dec("-10.00")));
    }

    #[test]
    fn test_submit_request_accepts_bare_list() {
        let mut engine = BalanceEngine::new();

        let added = engine
            .submit_request(&json!([
                {"payer": "Alice", "amount": 12, "receivers": ["Bob"]}
            ]))
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(engine.balances().get("Bob"), Some(dec("-12.00")));
    }

    #[test]
    fn test_submit_request_reports_non_record_index() {
        let mut engine = BalanceEngine::new();

        let result = engine.submit_request(&json!({
            "transactions": [
                {"payer": "Alice", "amount": "1.00", "receivers": ["Bob"]},
                "Bob paid 5"
            ]
        }));

        assert_eq!(
            result,
            Err(ExpenseError::malformed(1, ValidationError::NotARecord))
        );
        assert_eq!(engine.transactions().len(), 1);
    }

    #[test]
    fn test_submit_request_rejects_payload_without_list() {
        let mut engine = BalanceEngine::new();

        assert!(matches!(
            engine.submit_request(&json!({"transactions": "none"})),
            Err(ExpenseError::InvalidBatch { .. })
        ));
        assert!(matches!(
            engine.submit_request(&json!({"other": []})),
            Err(ExpenseError::InvalidBatch { .. })
        ));
        assert!(matches!(
            engine.submit_request(&json!(42)),
            Err(ExpenseError::InvalidBatch { .. })
        ));
    }

    #[test]
    fn test_balances_are_stable_between_calls() {
        let mut engine = BalanceEngine::new();
        engine
            .submit(&RawTransaction::new("Alice", "10.01", ["Alice", "Bob", "Carol"]))
            .unwrap();

        let first = engine.balances();
        let second = engine.balances();
        assert_eq!(first, second);
        assert_eq!(first.total(), Decimal::ZERO);
    }

    #[test]
    fn test_trait_object_usage() {
        let mut engine = BalanceEngine::new();
        let ledger: &mut dyn ExpenseLedger = &mut engine;

        ledger
            .submit_batch(&[RawTransaction::new("Alice", "4.00", ["Bob", "Carol"])])
            .unwrap();
        assert_eq!(ledger.transaction_count(), 1);
        assert_eq!(ledger.balances().get("Carol"), Some(dec("-2.00")));
    }
}
