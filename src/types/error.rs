//! Error types for the Group Expense Engine
//!
//! Errors fall into two layers:
//!
//! - [`ValidationError`]: why a single candidate transaction was rejected
//! - [`ExpenseError`]: failures of a whole submission or of the surrounding
//!   I/O (file access, CSV/JSON parsing, runtime setup)
//!
//! A rounding residual that survives correction is *not* an error; it is
//! reported through `tracing` and the balances are returned regardless.

use rust_decimal::Decimal;
use thiserror::Error;

/// Broad class of a validation failure
///
/// `Type` means a field had the wrong shape (not a string, not a list);
/// `Value` means the shape was right but the content was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Type,
    Value,
}

/// Reason a candidate transaction was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Payer is missing or not a string
    #[error("Payer must be a string")]
    InvalidPayer,

    /// Amount could not be read as an exact decimal number
    #[error("Invalid amount: '{value}'")]
    InvalidAmount {
        /// The offending value, rendered as JSON text
        value: String,
    },

    /// Amount is zero or negative
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount as written by the caller
        amount: String,
    },

    /// Amount exceeds the per-transaction ceiling
    #[error("Amount {amount} exceeds maximum allowed value {max}")]
    AmountTooLarge {
        /// The rejected amount as written by the caller
        amount: String,
        /// The ceiling
        max: Decimal,
    },

    /// Receivers field is missing or not a list
    #[error("Receivers must be provided as a list")]
    InvalidReceiversType,

    /// Receivers list is empty
    #[error("Receivers list cannot be empty")]
    EmptyReceivers,

    /// A receivers element is not a string
    #[error("Receiver at position {position} must be a string")]
    InvalidReceiverElement {
        /// Zero-based position inside the receivers list
        position: usize,
    },

    /// Batch element is not a record at all
    #[error("Transaction must be an object with payer, amount and receivers")]
    NotARecord,
}

impl ValidationError {
    /// Whether this is a shape (`Type`) or content (`Value`) problem
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationError::InvalidPayer
            | ValidationError::InvalidReceiversType
            | ValidationError::InvalidReceiverElement { .. }
            | ValidationError::NotARecord => ErrorCategory::Type,
            ValidationError::InvalidAmount { .. }
            | ValidationError::NonPositiveAmount { .. }
            | ValidationError::AmountTooLarge { .. }
            | ValidationError::EmptyReceivers => ErrorCategory::Value,
        }
    }
}

/// Main error type for submissions and file processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpenseError {
    /// A batch element failed validation
    ///
    /// Elements before `index` have already been appended to the ledger.
    #[error("Transaction {index} is invalid: {source}")]
    MalformedBatchElement {
        /// Zero-based position of the element in the submitted batch
        index: usize,
        /// Why it was rejected
        source: ValidationError,
    },

    /// Submission payload does not contain a list of transactions
    #[error("Invalid batch: {message}")]
    InvalidBatch {
        /// What was wrong with the payload
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV or JSON input could not be parsed
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Async runtime could not be set up or a task failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for ExpenseError {
    fn from(error: std::io::Error) -> Self {
        ExpenseError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ExpenseError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for ExpenseError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ExpenseError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(error: serde_json::Error) -> Self {
        let line = match error.line() {
            0 => None,
            l => Some(l as u64),
        };

        ExpenseError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl ExpenseError {
    /// Create a MalformedBatchElement error
    pub fn malformed(index: usize, source: ValidationError) -> Self {
        ExpenseError::MalformedBatchElement { index, source }
    }

    /// Create an InvalidBatch error
    pub fn invalid_batch(message: &str) -> Self {
        ExpenseError::InvalidBatch {
            message: message.to_string(),
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl std::fmt::Display) -> Self {
        ExpenseError::Runtime {
            message: message.to_string(),
        }
    }

    /// Shift the index of a batch element error by `offset`
    ///
    /// Used when a large input is submitted in several chunks so that the
    /// reported index stays relative to the whole input.
    pub fn offset_index(self, offset: usize) -> Self {
        match self {
            ExpenseError::MalformedBatchElement { index, source } => {
                ExpenseError::MalformedBatchElement {
                    index: index + offset,
                    source,
                }
            }
            other => other,
        }
    }

    /// Failing batch index, if this is a batch element error
    pub fn index(&self) -> Option<usize> {
        match self {
            ExpenseError::MalformedBatchElement { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_AMOUNT;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_payer(ValidationError::InvalidPayer, "Payer must be a string")]
    #[case::invalid_amount(
        ValidationError::InvalidAmount { value: "\"abc\"".to_string() },
        "Invalid amount: '\"abc\"'"
    )]
    #[case::non_positive(
        ValidationError::NonPositiveAmount { amount: "-1".to_string() },
        "Amount must be positive, got -1"
    )]
    #[case::too_large(
        ValidationError::AmountTooLarge { amount: "1000000000000".to_string(), max: MAX_AMOUNT },
        "Amount 1000000000000 exceeds maximum allowed value 999999999999.99"
    )]
    #[case::receivers_type(ValidationError::InvalidReceiversType, "Receivers must be provided as a list")]
    #[case::empty_receivers(ValidationError::EmptyReceivers, "Receivers list cannot be empty")]
    #[case::receiver_element(
        ValidationError::InvalidReceiverElement { position: 2 },
        "Receiver at position 2 must be a string"
    )]
    fn test_validation_error_display(#[case] error: ValidationError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_payer(ValidationError::InvalidPayer, ErrorCategory::Type)]
    #[case::receivers_type(ValidationError::InvalidReceiversType, ErrorCategory::Type)]
    #[case::receiver_element(ValidationError::InvalidReceiverElement { position: 0 }, ErrorCategory::Type)]
    #[case::not_a_record(ValidationError::NotARecord, ErrorCategory::Type)]
    #[case::invalid_amount(ValidationError::InvalidAmount { value: "x".to_string() }, ErrorCategory::Value)]
    #[case::non_positive(ValidationError::NonPositiveAmount { amount: "0".to_string() }, ErrorCategory::Value)]
    #[case::empty_receivers(ValidationError::EmptyReceivers, ErrorCategory::Value)]
    fn test_validation_error_category(#[case] error: ValidationError, #[case] expected: ErrorCategory) {
        assert_eq!(error.category(), expected);
    }

    #[rstest]
    #[case::malformed(
        ExpenseError::malformed(3, ValidationError::EmptyReceivers),
        "Transaction 3 is invalid: Receivers list cannot be empty"
    )]
    #[case::invalid_batch(
        ExpenseError::invalid_batch("expected a list"),
        "Invalid batch: expected a list"
    )]
    #[case::parse_error_with_line(
        ExpenseError::ParseError { line: Some(4), message: "bad field".to_string() },
        "Parse error at line 4: bad field"
    )]
    #[case::parse_error_without_line(
        ExpenseError::ParseError { line: None, message: "bad field".to_string() },
        "Parse error: bad field"
    )]
    #[case::file_not_found(
        ExpenseError::FileNotFound { path: "missing.csv".to_string() },
        "File not found: missing.csv"
    )]
    fn test_expense_error_display(#[case] error: ExpenseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_offset_index_only_touches_batch_errors() {
        let shifted = ExpenseError::malformed(1, ValidationError::InvalidPayer).offset_index(10);
        assert_eq!(shifted.index(), Some(11));

        let untouched = ExpenseError::invalid_batch("x").offset_index(10);
        assert_eq!(untouched, ExpenseError::invalid_batch("x"));
        assert_eq!(untouched.index(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: ExpenseError = io_error.into();
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_conversion_keeps_line() {
        let json_error = serde_json::from_str::<serde_json::Value>("{\n\"a\": }").unwrap_err();
        let error: ExpenseError = json_error.into();
        assert!(matches!(error, ExpenseError::ParseError { line: Some(2), .. }));
    }
}
