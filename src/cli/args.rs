use crate::io::{InputFormat, OutputFormat};
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compute who owes whom from a file of shared expenses
#[derive(Parser, Debug)]
#[command(name = "expense-engine")]
#[command(about = "Compute who owes whom from a file of shared expenses", long_about = None)]
pub struct CliArgs {
    /// Input file path containing transaction records (CSV or JSON)
    #[arg(value_name = "INPUT", help = "Path to the input CSV or JSON file")]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        env = "EXPENSE_ENGINE_STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for batched asynchronous"
    )]
    pub strategy: StrategyType,

    /// Input format, detected from the file extension by default
    #[arg(
        long = "input-format",
        value_name = "FORMAT",
        default_value = "auto",
        help = "Input format: 'auto' (by extension), 'csv' or 'json'"
    )]
    pub input_format: InputFormat,

    /// Output format for balances
    #[arg(
        long = "output-format",
        value_name = "FORMAT",
        default_value = "csv",
        help = "Output format: 'csv', 'json' or 'text'"
    )]
    pub output_format: OutputFormat,

    /// Number of records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of parsed batches in flight (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of parsed batches waiting for submission (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Log filter directive for diagnostics written to stderr
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        env = "EXPENSE_ENGINE_LOG",
        default_value = "warn",
        help = "Log level or filter directive, e.g. 'debug' or 'group_expense_engine=trace'"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Unset values fall back to defaults; zero values are replaced with
    /// defaults by `BatchConfig::new`, which logs a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
