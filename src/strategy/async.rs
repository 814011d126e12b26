//! Asynchronous batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. A reader
//! task parses the input in batches and hands them over a bounded channel to
//! a single submitter, which feeds each batch to a `SharedEngine`.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── reader task: AsyncReader → mpsc channel (bounded)
//!     └── submitter: SharedEngine::submit_batch, one batch at a time
//! ```
//!
//! # Ordering
//!
//! Parsing runs ahead of submission by at most `max_concurrent_batches`
//! batches. Submission is strictly sequential so the ledger order matches
//! the input order, and a failing record is reported with its position in
//! the whole input rather than within its batch.

use crate::core::SharedEngine;
use crate::io::async_reader::AsyncReader;
use crate::io::json_format::read_json_payload;
use crate::io::sync_reader::open_error;
use crate::io::InputFormat;
use crate::strategy::ProcessingStrategy;
use crate::types::{Balances, ExpenseError, RawTransaction};
use std::path::Path;
use tokio::sync::mpsc;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, info, warn};

type BatchMessage = Result<Vec<RawTransaction>, ExpenseError>;

/// Configuration for batch processing
///
/// Controls how records are batched and how far parsing may run ahead of
/// submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of records per batch
    pub batch_size: usize,
    /// Maximum number of parsed batches waiting for submission, also used as
    /// the runtime's worker thread count
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Produces the same balances and the same errors as the synchronous
/// strategy for any input.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Stream CSV batches from a reader task into the engine
    async fn submit_csv(&self, engine: &SharedEngine, input_path: &Path) -> Result<usize, ExpenseError> {
        let file = tokio::fs::File::open(input_path)
            .await
            .map_err(|e| open_error(input_path, e))?;

        let mut reader = AsyncReader::new(file.compat());
        let batch_size = self.config.batch_size;
        let (sender, mut receiver) = mpsc::channel::<BatchMessage>(self.config.max_concurrent_batches.max(1));

        let producer = tokio::spawn(async move {
            loop {
                match reader.read_batch(batch_size).await {
                    Ok(batch) if batch.is_empty() => break,
                    Ok(batch) => {
                        if sender.send(Ok(batch)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        // The submitter may already have stopped; nothing else to do.
                        let _ = sender.send(Err(e)).await;
                        break;
                    }
                }
            }
        });

        let mut submitted = 0;
        while let Some(message) = receiver.recv().await {
            let batch = message?;
            let added = engine
                .submit_batch(&batch)
                .map_err(|e| e.offset_index(submitted))?;
            submitted += added;
            debug!(added, submitted, "batch submitted");
        }

        producer.await.map_err(ExpenseError::runtime)?;
        Ok(submitted)
    }

    async fn submit_json(engine: &SharedEngine, input_path: &Path) -> Result<usize, ExpenseError> {
        let bytes = tokio::fs::read(input_path)
            .await
            .map_err(|e| open_error(input_path, e))?;
        let payload = read_json_payload(bytes.as_slice())?;
        engine.submit_request(&payload)
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn compute(
        &self,
        input_path: &Path,
        input_format: InputFormat,
    ) -> Result<Balances, ExpenseError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches.max(1))
            .build()
            .map_err(|e| ExpenseError::runtime(format!("failed to create tokio runtime: {}", e)))?;

        let format = input_format.resolve(input_path);
        debug!(
            path = %input_path.display(),
            ?format,
            batch_size = self.config.batch_size,
            "processing input in batches"
        );

        runtime.block_on(async {
            let engine = SharedEngine::new();

            let submitted = match format {
                InputFormat::Json => Self::submit_json(&engine, input_path).await?,
                InputFormat::Csv | InputFormat::Auto => self.submit_csv(&engine, input_path).await?,
            };

            info!(submitted, "input processed");
            Ok(engine.balances())
        })
    }
}
