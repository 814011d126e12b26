//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over raw transaction candidates from a CSV
//! source. Supports batch reading so the async strategy can hand whole
//! batches to the engine.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of RawTransactions
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{ExpenseError, RawTransaction};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Memory use is bounded by the requested batch size.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    pending_error: Option<ExpenseError>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            pending_error: None,
        }
    }

    /// Read up to `batch_size` candidates
    ///
    /// Returns an empty vector once the source is exhausted.
    ///
    /// # Errors
    ///
    /// A row that cannot be deserialized ends the batch early. The rows read
    /// before it are returned, and the `ExpenseError::ParseError` for the row
    /// is returned by the following call.
    pub async fn read_batch(
        &mut self,
        batch_size: usize,
    ) -> Result<Vec<RawTransaction>, ExpenseError> {
        if let Some(error) = self.pending_error.take() {
            return Err(error);
        }

        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => batch.push(convert_csv_record(csv_record)),
                Some(Err(e)) if batch.is_empty() => return Err(e.into()),
                Some(Err(e)) => {
                    self.pending_error = Some(e.into());
                    break;
                }
                None => break,
            }
        }

        Ok(batch)
    }
}
