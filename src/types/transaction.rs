//! Transaction-related types for the Group Expense Engine
//!
//! This module defines the validated [`Transaction`] stored in the ledger and
//! the untyped [`RawTransaction`] candidate that collaborators submit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Person identifier
///
/// Any string is accepted, including the empty string.
pub type PersonId = String;

/// Largest amount a single transaction may carry (12 integer digits, 2 decimals)
///
/// `99_999_999_999_999` split into its low and mid 32-bit words, at scale 2.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x107A_3FFF, 0x5AF3, 0, false, 2);

/// A validated shared expense
///
/// Once accepted into the ledger a transaction is never modified. Every
/// occurrence of a person in `receivers` owes one equal share of `amount`.
///
/// Transactions are only produced by [`validate`](crate::core::validate), so
/// every instance satisfies `0 < amount <= MAX_AMOUNT` and has at least one
/// receiver. They cannot be assembled by hand outside this crate:
///
/// ```compile_fail
/// use group_expense_engine::Transaction;
/// use rust_decimal::Decimal;
///
/// let tx = Transaction { payer: "Alice".into(), amount: Decimal::ONE, receivers: vec![] };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub(crate) payer: PersonId,
    pub(crate) amount: Decimal,
    pub(crate) receivers: Vec<PersonId>,
}

impl Transaction {
    /// Person who paid
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Exact amount paid
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// People sharing the cost, in submitted order (never empty)
    pub fn receivers(&self) -> &[PersonId] {
        &self.receivers
    }

    /// Amount owed by each receiver occurrence
    ///
    /// Division is carried out at `rust_decimal`'s full precision (28
    /// significant digits); rounding to currency precision happens only once
    /// per person, after accumulation.
    pub fn share(&self) -> Decimal {
        self.amount / Decimal::from(self.receivers.len())
    }
}

/// Candidate transaction as received from a collaborator
///
/// Fields are kept as raw JSON values so that type errors (a numeric payer, a
/// receivers field that is not a list, ...) can be reported precisely by the
/// validator instead of failing deserialization. Missing fields become
/// `Value::Null`; unknown fields such as `description` are dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub payer: Value,

    #[serde(default)]
    pub amount: Value,

    #[serde(default)]
    pub receivers: Value,
}

impl RawTransaction {
    /// Build a candidate from already string-typed parts
    ///
    /// Used by the CSV reader and by tests.
    pub fn new<I, S>(payer: impl Into<String>, amount: impl Into<String>, receivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawTransaction {
            payer: Value::String(payer.into()),
            amount: Value::String(amount.into()),
            receivers: Value::Array(
                receivers
                    .into_iter()
                    .map(|r| Value::String(r.into()))
                    .collect(),
            ),
        }
    }

    /// Interpret an arbitrary JSON value as a candidate record
    ///
    /// Returns `None` when the value is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |name: &str| object.get(name).cloned().unwrap_or(Value::Null);

        Some(RawTransaction {
            payer: field("payer"),
            amount: field("amount"),
            receivers: field("receivers"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_max_amount_constant() {
        assert_eq!(MAX_AMOUNT, Decimal::from_str("999999999999.99").unwrap());
    }

    #[test]
    fn test_share_counts_duplicate_receivers() {
        let tx = Transaction {
            payer: "Alice".to_string(),
            amount: Decimal::new(900, 2),
            receivers: vec!["Bob".to_string(), "Bob".to_string(), "Carol".to_string()],
        };

        assert_eq!(tx.share(), Decimal::new(300, 2));
        assert_eq!(tx.payer(), "Alice");
        assert_eq!(tx.receivers().len(), 3);
    }

    #[test]
    fn test_raw_transaction_ignores_extra_fields() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "payer": "Alice",
            "amount": "10.00",
            "receivers": ["Alice", "Bob"],
            "description": "Lunch"
        }))
        .unwrap();

        assert_eq!(raw, RawTransaction::new("Alice", "10.00", ["Alice", "Bob"]));
    }

    #[test]
    fn test_raw_transaction_missing_fields_are_null() {
        let raw: RawTransaction = serde_json::from_value(json!({ "payer": "Alice" })).unwrap();

        assert_eq!(raw.amount, Value::Null);
        assert_eq!(raw.receivers, Value::Null);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(RawTransaction::from_value(&json!(42)).is_none());
        assert!(RawTransaction::from_value(&json!(["Alice"])).is_none());
        assert!(RawTransaction::from_value(&json!({})).is_some());
    }
}
