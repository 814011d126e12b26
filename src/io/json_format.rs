//! JSON format handling
//!
//! Input is the submission request shape, either `{"transactions": [...]}` or
//! a bare array of records. Output is an object of person → number.

use crate::types::{Balances, ExpenseError};
use serde_json::Value;
use std::io::{Read, Write};

/// Parse a submission payload
///
/// Only JSON syntax is checked here; the payload shape is checked by
/// [`BalanceEngine::submit_request`](crate::core::BalanceEngine::submit_request).
pub fn read_json_payload<R: Read>(reader: R) -> Result<Value, ExpenseError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write balances as a pretty-printed JSON object followed by a newline
pub fn write_balances_json(balances: &Balances, output: &mut dyn Write) -> Result<(), ExpenseError> {
    serde_json::to_writer_pretty(&mut *output, balances)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
