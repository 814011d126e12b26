//! Natural-language extraction seam
//!
//! Turning chat messages such as "Alice paid $30 for lunch with Bob" into
//! transaction records is delegated to an external language model. The engine
//! only sees the result through [`TransactionExtractor`], so any client (a
//! hosted model, a rules-based parser, a test double) can be plugged in.
//!
//! A direct payment between two people is expected as a one-receiver
//! transaction that excludes the payer: "Charlie paid Alice 15" becomes
//! `{"payer": "Charlie", "amount": "15.00", "receivers": ["Alice"]}`.

use crate::core::ExpenseLedger;
use crate::types::{ExpenseError, RawTransaction};
use thiserror::Error;
use tracing::debug;

/// Failure of the external extractor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// The backing service could not be reached or refused the request
    #[error("Extractor unavailable: {message}")]
    Unavailable { message: String },

    /// The service answered, but not with transaction records
    #[error("Extractor returned unstructured output: {message}")]
    Unstructured { message: String },
}

/// Error from [`submit_text`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Submission(#[from] ExpenseError),
}

/// Translates free text into candidate transactions
pub trait TransactionExtractor {
    fn extract(&self, text: &str) -> Result<Vec<RawTransaction>, ExtractionError>;
}

impl<F> TransactionExtractor for F
where
    F: Fn(&str) -> Result<Vec<RawTransaction>, ExtractionError>,
{
    fn extract(&self, text: &str) -> Result<Vec<RawTransaction>, ExtractionError> {
        self(text)
    }
}

/// Extract transactions from `text` and submit them as one batch
///
/// A message that yields no transactions (a question, small talk) is not an
/// error and appends nothing.
pub fn submit_text<E, X>(engine: &mut E, extractor: &X, text: &str) -> Result<usize, IngestError>
where
    E: ExpenseLedger + ?Sized,
    X: TransactionExtractor + ?Sized,
{
    let batch = extractor.extract(text)?;
    debug!(candidates = batch.len(), "extracted transactions from message");

    if batch.is_empty() {
        return Ok(0);
    }
    Ok(engine.submit_batch(&batch)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BalanceEngine;
    use crate::types::ValidationError;
    use rust_decimal::Decimal;

    /// Understands only "<payer> paid <amount> for <a>,<b>,..."
    struct PatternExtractor;

    impl TransactionExtractor for PatternExtractor {
        fn extract(&self, text: &str) -> Result<Vec<RawTransaction>, ExtractionError> {
            let unstructured = || ExtractionError::Unstructured {
                message: text.to_string(),
            };
            let (payer, rest) = text.split_once(" paid ").ok_or_else(unstructured)?;
            let (amount, receivers) = rest.split_once(" for ").ok_or_else(unstructured)?;

            Ok(vec![RawTransaction::new(
                payer,
                amount,
                receivers.split(',').map(str::trim),
            )])
        }
    }

    #[test]
    fn test_submit_text_appends_extracted_transactions() {
        let mut engine = BalanceEngine::new();

        submit_text(&mut engine, &PatternExtractor, "Alice paid 30.00 for Alice, Bob, Charlie").unwrap();
        submit_text(&mut engine, &PatternExtractor, "Bob paid 10.00 for Alice").unwrap();

        let balances = engine.balances();
        assert_eq!(balances.get("Bob"), Some(Decimal::new(0, 2)));
        assert_eq!(balances.get("Charlie"), Some(Decimal::new(-1000, 2)));
    }

    #[test]
    fn test_extraction_failure_is_reported() {
        let mut engine = BalanceEngine::new();

        let result = submit_text(&mut engine, &PatternExtractor, "what does everyone owe?");
        assert!(matches!(
            result,
            Err(IngestError::Extraction(ExtractionError::Unstructured { .. }))
        ));
        assert!(engine.transactions().is_empty());
    }

    #[test]
    fn test_invalid_extraction_surfaces_batch_error() {
        let mut engine = BalanceEngine::new();

        let result = submit_text(&mut engine, &PatternExtractor, "Alice paid lots for Bob");
        assert_eq!(
            result,
            Err(IngestError::Submission(ExpenseError::malformed(
                0,
                ValidationError::InvalidAmount {
                    value: "\"lots\"".to_string()
                }
            )))
        );
    }

    #[test]
    fn test_closure_extractor_and_empty_result() {
        let mut engine = BalanceEngine::new();
        let nothing = |_: &str| -> Result<Vec<RawTransaction>, ExtractionError> { Ok(Vec::new()) };

        assert_eq!(submit_text(&mut engine, &nothing, "hello"), Ok(0));
    }
}
