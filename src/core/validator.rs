//! Transaction validation
//!
//! Turns an untyped [`RawTransaction`] into a [`Transaction`] or explains why
//! it cannot be accepted. Validation is pure: it never touches the ledger.
//!
//! Checks run in a fixed order (payer, amount, receivers) and the first
//! failing check is reported.

use crate::types::{RawTransaction, Transaction, ValidationError, MAX_AMOUNT};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Validate a candidate record
///
/// # Errors
///
/// - [`ValidationError::InvalidPayer`] if the payer is not a string
/// - [`ValidationError::InvalidAmount`] if the amount is not a decimal number
/// - [`ValidationError::NonPositiveAmount`] if the amount is `<= 0`
/// - [`ValidationError::AmountTooLarge`] if the amount exceeds [`MAX_AMOUNT`]
/// - [`ValidationError::InvalidReceiversType`] if receivers is not a list
/// - [`ValidationError::EmptyReceivers`] if receivers is empty
/// - [`ValidationError::InvalidReceiverElement`] if a receiver is not a string
pub fn validate(raw: &RawTransaction) -> Result<Transaction, ValidationError> {
    let payer = match &raw.payer {
        Value::String(payer) => payer.clone(),
        _ => return Err(ValidationError::InvalidPayer),
    };

    let amount = parse_amount(&raw.amount)?;
    let receivers = parse_receivers(&raw.receivers)?;

    Ok(Transaction {
        payer,
        amount,
        receivers,
    })
}

/// Read an amount from a JSON string or number and range-check it
pub fn parse_amount(value: &Value) -> Result<Decimal, ValidationError> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        other => {
            return Err(ValidationError::InvalidAmount {
                value: other.to_string(),
            })
        }
    };

    let amount = match parse_decimal(&text) {
        Some(amount) => amount,
        None => return Err(classify_unrepresentable(&text, value)),
    };

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount { amount: text });
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            amount: text,
            max: MAX_AMOUNT,
        });
    }

    Ok(amount)
}

fn parse_receivers(value: &Value) -> Result<Vec<String>, ValidationError> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ValidationError::InvalidReceiversType),
    };

    if items.is_empty() {
        return Err(ValidationError::EmptyReceivers);
    }

    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or(ValidationError::InvalidReceiverElement { position })
        })
        .collect()
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text).ok().or_else(|| {
        if text.contains(['e', 'E']) {
            Decimal::from_scientific(text).ok()
        } else {
            None
        }
    })
}

/// Numerals outside `Decimal`'s range are still numbers; report them by sign
/// rather than as unparseable.
fn classify_unrepresentable(text: &str, value: &Value) -> ValidationError {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 1.0 => ValidationError::AmountTooLarge {
            amount: text.to_string(),
            max: MAX_AMOUNT,
        },
        Ok(v) if v.is_finite() && v <= -1.0 => ValidationError::NonPositiveAmount {
            amount: text.to_string(),
        },
        _ => ValidationError::InvalidAmount {
            value: value.to_string(),
        },
    }
}
