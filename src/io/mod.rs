//! I/O module
//!
//! Handles transaction input and balance output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, balance output)
//! - `json_format` - JSON submission payloads and balance output
//! - `text_format` - human-readable balance summary
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod json_format;
pub mod sync_reader;
pub mod text_format;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_balances_csv, CsvRecord};
pub use json_format::{read_json_payload, write_balances_json};
pub use sync_reader::SyncReader;
pub use text_format::write_balances_text;

use crate::types::{Balances, ExpenseError};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

/// Input format of a transactions file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// Pick by file extension: `.json` is JSON, anything else CSV
    #[default]
    Auto,
    Csv,
    Json,
}

impl InputFormat {
    /// Resolve `Auto` against the input path
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::Json
                } else {
                    InputFormat::Csv
                }
            }
            explicit => explicit,
        }
    }
}

/// Output format for computed balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Text,
}

/// Write balances in the requested format
pub fn write_balances(
    balances: &Balances,
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), ExpenseError> {
    match format {
        OutputFormat::Csv => write_balances_csv(balances, output),
        OutputFormat::Json => write_balances_json(balances, output),
        OutputFormat::Text => write_balances_text(balances, output),
    }
}
