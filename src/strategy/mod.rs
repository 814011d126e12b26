//! Processing strategy module for file-driven balance computation
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing input parsing, submission to the engine, and balance output.
//! Different implementations (synchronous, asynchronous batch) can be selected
//! at runtime. Both produce identical balances for the same input.

use crate::cli::StrategyType;
use crate::io::{write_balances, InputFormat, OutputFormat};
use crate::types::{Balances, ExpenseError};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete pipelines
///
/// Each strategy reads candidate transactions from a file, submits them to a
/// balance engine, and returns the computed balances.
pub trait ProcessingStrategy: Send + Sync {
    /// Submit every transaction in the input file and compute balances
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The input cannot be parsed as the resolved format
    /// - A transaction fails validation (`MalformedBatchElement` with the
    ///   zero-based position of the record in the whole input)
    fn compute(&self, input_path: &Path, input_format: InputFormat)
        -> Result<Balances, ExpenseError>;

    /// Compute balances and write them to `output`
    ///
    /// Nothing is written when computation fails.
    fn process(
        &self,
        input_path: &Path,
        input_format: InputFormat,
        output_format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<(), ExpenseError> {
        let balances = self.compute(input_path, input_format)?;
        write_balances(&balances, output_format, output)
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is ignored by the synchronous strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_strategies_write_identical_output(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"payer,amount,receivers\nAlice,10.00,Alice;Bob;Charlie\n")
            .unwrap();
        file.flush().unwrap();

        let strategy = create_strategy(strategy_type, Some(BatchConfig::new(1, 2)));
        let mut output = Vec::new();
        strategy
            .process(file.path(), InputFormat::Csv, OutputFormat::Csv, &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "person,balance\nAlice,6.66\nBob,-3.33\nCharlie,-3.33\n"
        );
    }

    #[rstest]
    fn test_failed_computation_writes_nothing(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"payer,amount,receivers\nAlice,-1,Bob\n").unwrap();
        file.flush().unwrap();

        let strategy = create_strategy(strategy_type, None);
        let mut output = Vec::new();
        let result = strategy.process(file.path(), InputFormat::Csv, OutputFormat::Json, &mut output);

        assert_eq!(result.unwrap_err().index(), Some(0));
        assert!(output.is_empty());
    }
}
