//! Tracing/logging initialization.
//!
//! Diagnostics go to stderr; stdout carries only the computed balances.

use tracing_subscriber::EnvFilter;

/// Filter used when the requested directive does not parse
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing for the process with the given filter directive
/// (`"debug"`, `"group_expense_engine=trace"`, ...).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
