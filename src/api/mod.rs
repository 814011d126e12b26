//! Collaborator boundary
//!
//! Transport layers (an HTTP handler, a chat front end) talk to the engine
//! through this module:
//! - `tools` - function-call dispatch and tool schema for language-model front ends
//! - `extractor` - the seam for external free-text → transaction extraction

pub mod extractor;
pub mod tools;

pub use extractor::{submit_text, ExtractionError, IngestError, TransactionExtractor};
pub use tools::{handle_tool_call, tool_definitions, ToolCall, ToolResponse, ToolStatus};
