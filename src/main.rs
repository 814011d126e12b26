//! Group expense engine CLI
//!
//! Reads shared expenses from a CSV or JSON file, computes each person's net
//! balance, and prints the balances to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- expenses.csv > balances.csv
//! cargo run -- --strategy sync expenses.csv
//! cargo run -- --output-format text expenses.json
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 expenses.csv
//! EXPENSE_ENGINE_LOG=debug cargo run -- expenses.csv
//! ```
//!
//! # Processing Strategies
//!
//! - **sync**: Streaming reads with single-threaded submission
//! - **async**: Batched reads on a tokio runtime feeding a shared engine (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing file, unparseable input, invalid transaction, etc.)

use group_expense_engine::cli;
use group_expense_engine::strategy;
use group_expense_engine::telemetry;
use std::process;
use tracing::error;

fn main() {
    let args = cli::parse_args();
    telemetry::init(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(
        &args.input_file,
        args.input_format,
        args.output_format,
        &mut output,
    ) {
        error!(error = %e, "processing failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
