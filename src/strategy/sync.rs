//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. Orchestrates
//! the flow between input parsing and the `BalanceEngine`:
//! - CSV input is streamed through `SyncReader`, one record at a time
//! - JSON input is parsed whole and submitted as one request
//!
//! Processing stops at the first record that fails validation. Records
//! before it stay in the ledger, but no balances are produced for a failed
//! run.

use crate::core::BalanceEngine;
use crate::io::json_format::read_json_payload;
use crate::io::sync_reader::{open_error, SyncReader};
use crate::io::InputFormat;
use crate::strategy::ProcessingStrategy;
use crate::types::{Balances, ExpenseError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use group_expense_engine::io::{InputFormat, OutputFormat};
/// use group_expense_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy
///     .process(Path::new("expenses.csv"), InputFormat::Auto, OutputFormat::Csv, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl SyncProcessingStrategy {
    fn submit_csv(engine: &mut BalanceEngine, input_path: &Path) -> Result<usize, ExpenseError> {
        let reader = SyncReader::new(input_path)?;
        let mut submitted = 0;

        for (index, result) in reader.enumerate() {
            let raw = result?;
            engine
                .submit(&raw)
                .map_err(|source| ExpenseError::malformed(index, source))?;
            submitted += 1;
        }

        Ok(submitted)
    }

    fn submit_json(engine: &mut BalanceEngine, input_path: &Path) -> Result<usize, ExpenseError> {
        let file = File::open(input_path).map_err(|e| open_error(input_path, e))?;
        let payload = read_json_payload(BufReader::new(file))?;
        engine.submit_request(&payload)
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn compute(
        &self,
        input_path: &Path,
        input_format: InputFormat,
    ) -> Result<Balances, ExpenseError> {
        let mut engine = BalanceEngine::new();
        let format = input_format.resolve(input_path);
        debug!(path = %input_path.display(), ?format, "processing input synchronously");

        let submitted = match format {
            InputFormat::Json => Self::submit_json(&mut engine, input_path)?,
            InputFormat::Csv | InputFormat::Auto => Self::submit_csv(&mut engine, input_path)?,
        };

        info!(submitted, "input processed");
        Ok(engine.balances())
    }
}
