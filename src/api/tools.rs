//! Tool-call dispatch
//!
//! A conversational front end backed by a language model does not call the
//! engine directly; the model emits *tool calls* (a function name plus JSON
//! arguments) and the front end forwards them here. This module maps those
//! calls onto [`ExpenseLedger`] operations and builds the JSON responses that
//! are fed back to the model.
//!
//! Two tools exist:
//!
//! - `add_transactions` with arguments `{"transactions": [...]}`
//! - `calculate_balances` with no arguments

use crate::core::engine::transaction_list;
use crate::core::ExpenseLedger;
use crate::types::{Balances, ExpenseError, RawTransaction, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Name of the submission tool
pub const ADD_TRANSACTIONS: &str = "add_transactions";

/// Name of the balance tool
pub const CALCULATE_BALANCES: &str = "calculate_balances";

/// A function call requested by the model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    pub name: String,

    /// Either a JSON object or the JSON text of one, as model APIs send it
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        ToolCall {
            name: name.into(),
            arguments,
        }
    }

    fn parsed_arguments(&self) -> Result<Value, ExpenseError> {
        match &self.arguments {
            Value::String(text) => Ok(serde_json::from_str(text)?),
            other => Ok(other.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Result of a tool call, serialized back to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub status: ToolStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number of transactions appended by `add_transactions`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub balances: Option<Balances>,

    /// Failing batch index, for batch element errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl ToolResponse {
    fn added(count: usize) -> Self {
        ToolResponse {
            status: ToolStatus::Success,
            message: Some("Transactions added successfully.".to_string()),
            added: Some(count),
            balances: None,
            index: None,
        }
    }

    fn balances(balances: Balances) -> Self {
        ToolResponse {
            status: ToolStatus::Success,
            message: None,
            added: None,
            balances: Some(balances),
            index: None,
        }
    }

    fn error(message: String) -> Self {
        ToolResponse {
            status: ToolStatus::Error,
            message: Some(message),
            added: None,
            balances: None,
            index: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}

impl From<ExpenseError> for ToolResponse {
    fn from(error: ExpenseError) -> Self {
        let index = error.index();
        ToolResponse {
            index,
            ..ToolResponse::error(error.to_string())
        }
    }
}

/// Execute a tool call against `engine`
///
/// Never fails: every problem, including an unknown tool name, is reported
/// inside the returned [`ToolResponse`].
pub fn handle_tool_call<E>(engine: &mut E, call: &ToolCall) -> ToolResponse
where
    E: ExpenseLedger + ?Sized,
{
    match call.name.as_str() {
        ADD_TRANSACTIONS => match add_transactions(engine, call) {
            Ok(count) => ToolResponse::added(count),
            Err(error) => error.into(),
        },
        CALCULATE_BALANCES => ToolResponse::balances(engine.balances()),
        other => ToolResponse::error(format!("Unknown function: {}", other)),
    }
}

fn add_transactions<E>(engine: &mut E, call: &ToolCall) -> Result<usize, ExpenseError>
where
    E: ExpenseLedger + ?Sized,
{
    let arguments = call.parsed_arguments()?;
    let items = transaction_list(&arguments)?;

    // Records up to the first non-object still go in, matching batch semantics.
    let mut batch = Vec::with_capacity(items.len());
    let mut not_a_record = None;
    for (index, item) in items.iter().enumerate() {
        match RawTransaction::from_value(item) {
            Some(raw) => batch.push(raw),
            None => {
                not_a_record = Some(index);
                break;
            }
        }
    }

    let added = engine.submit_batch(&batch)?;
    match not_a_record {
        Some(index) => Err(ExpenseError::malformed(index, ValidationError::NotARecord)),
        None => Ok(added),
    }
}

/// JSON schema of both tools, in the function-calling format model APIs expect
pub fn tool_definitions() -> Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": ADD_TRANSACTIONS,
                "description": "Add one or more expense transactions where people paid and others share the costs",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "transactions": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "payer": {
                                        "type": "string",
                                        "description": "Name of the person who paid."
                                    },
                                    "amount": {
                                        "type": "string",
                                        "description": "Amount paid as a decimal string, e.g. '10.99'."
                                    },
                                    "receivers": {
                                        "type": "array",
                                        "items": {"type": "string"},
                                        "description": "People sharing the expense. For a transfer, only the person receiving the payment."
                                    },
                                    "description": {
                                        "type": "string",
                                        "description": "Optional free text about the transaction."
                                    }
                                },
                                "required": ["payer", "amount", "receivers"]
                            }
                        }
                    },
                    "required": ["transactions"],
                    "additionalProperties": false
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": CALCULATE_BALANCES,
                "description": "Calculate current balances. Positive means the person is owed money, negative means they owe money.",
                "parameters": {
                    "type": "object",
                    "properties": {},
                    "additionalProperties": false
                }
            }
        }
    ])
}
