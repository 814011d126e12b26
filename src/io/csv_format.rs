//! CSV format handling for transaction records and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to raw transaction candidates
//! - Balance output serialization
//!
//! # Input format
//!
//! ```text
//! payer,amount,receivers,description
//! Alice,30.00,Alice;Bob;Charlie,Lunch
//! Bob,10.00,Alice,Transfer
//! ```
//!
//! Receivers are separated by `;` inside a single field. The `description`
//! column is optional and ignored.
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Balances, ExpenseError, RawTransaction};
use serde::Deserialize;
use std::io::Write;

/// Separator between receivers inside the `receivers` column
pub const RECEIVER_SEPARATOR: char = ';';

/// CSV record structure for deserialization
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub payer: String,
    pub amount: String,
    pub receivers: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Convert a CsvRecord to a RawTransaction
///
/// The amount is passed through as text so the validator sees exactly what
/// the file contains. Empty receiver segments (`"Alice;;Bob"`, a blank
/// column) are dropped; a row with no receivers at all is then rejected by
/// the validator as having an empty receivers list.
pub fn convert_csv_record(csv_record: CsvRecord) -> RawTransaction {
    let receivers = csv_record
        .receivers
        .split(RECEIVER_SEPARATOR)
        .map(str::trim)
        .filter(|receiver| !receiver.is_empty());

    RawTransaction::new(csv_record.payer, csv_record.amount, receivers)
}

/// Write balances in CSV format
///
/// Columns: person, balance. Rows are in identifier order and balances are
/// written with exactly two decimal places.
pub fn write_balances_csv(balances: &Balances, output: &mut dyn Write) -> Result<(), ExpenseError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["person", "balance"])?;

    for (person, amount) in balances {
        let balance = format!("{:.2}", amount);
        writer.write_record([person.as_str(), balance.as_str()])?;
    }

    writer.flush()?;

    Ok(())
}
