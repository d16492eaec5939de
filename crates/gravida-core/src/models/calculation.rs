use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A stored calculator invocation: which calculator ran, the request it
/// received, and the result it produced. This is the unit the history and
/// report layers persist and replay.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Calculation {
    pub id: Uuid,
    pub calculator_id: String,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
    pub created_at: jiff::Timestamp,
}

impl Calculation {
    /// Stamps a fresh record for one invocation.
    pub fn record(calculator_id: &str, input: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            calculator_id: calculator_id.to_string(),
            input,
            result,
            created_at: jiff::Timestamp::now(),
        }
    }
}
