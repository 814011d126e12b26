//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over raw transaction candidates from a CSV
//! file. Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<RawTransaction, ExpenseError>` for each CSV row:
//!
//! ```no_run
//! use group_expense_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(raw) => println!("Candidate: {:?}", raw),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Rows that cannot be deserialized are yielded as `ExpenseError::ParseError`
//!   carrying the line number
//! - Validation is not done here; rows with bad amounts or receivers are
//!   yielded as candidates and rejected by the engine

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{ExpenseError, RawTransaction};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
}

impl SyncReader {
    /// Open a CSV file for streaming iteration
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for the optional description column)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// - `ExpenseError::FileNotFound` if the path does not exist
    /// - `ExpenseError::IoError` for any other open failure
    pub fn new(path: &Path) -> Result<Self, ExpenseError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self { reader })
    }
}

impl Iterator for SyncReader {
    type Item = Result<RawTransaction, ExpenseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        Some(
            deserializer
                .next()?
                .map(convert_csv_record)
                .map_err(ExpenseError::from),
        )
    }
}

/// Map a file-open failure, singling out a missing file
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> ExpenseError {
    if error.kind() == ErrorKind::NotFound {
        ExpenseError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        ExpenseError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert_eq!(
            result.unwrap_err(),
            ExpenseError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_iterates_records_in_order() {
        let file = create_temp_csv(
            "payer,amount,receivers,description\n\
             Alice,30.00,Alice;Bob;Charlie,Lunch\n\
             Bob,10.00,Alice,\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 2);
        let first = records[0].as_ref().unwrap();
        assert_eq!(first.payer, json!("Alice"));
        assert_eq!(first.receivers, json!(["Alice", "Bob", "Charlie"]));
        let second = records[1].as_ref().unwrap();
        assert_eq!(second.amount, json!("10.00"));
    }

    #[test]
    fn test_sync_reader_description_column_is_optional() {
        let file = create_temp_csv("payer,amount,receivers\nAlice,5.00,Bob\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_ok());
    }

    #[test]
    fn test_sync_reader_trims_whitespace() {
        let file = create_temp_csv("payer,amount,receivers\n  Alice , 5.00 , Bob ; Carol \n");

        let raw = SyncReader::new(file.path()).unwrap().next().unwrap().unwrap();
        assert_eq!(raw.payer, json!("Alice"));
        assert_eq!(raw.amount, json!("5.00"));
        assert_eq!(raw.receivers, json!(["Bob", "Carol"]));
    }

    #[test]
    fn test_sync_reader_reports_short_row_with_line() {
        let file = create_temp_csv("payer,amount,receivers\nAlice,5.00,Bob\nBob\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_ok());
        assert!(matches!(
            records[1],
            Err(ExpenseError::ParseError { line: Some(3), .. })
        ));
    }

    #[test]
    fn test_sync_reader_passes_bad_amounts_through() {
        let file = create_temp_csv("payer,amount,receivers\nAlice,abc,Bob\n");

        let raw = SyncReader::new(file.path()).unwrap().next().unwrap().unwrap();
        assert_eq!(raw.amount, json!("abc"));
    }
}
