use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a successful dispatch.
///
/// Produced per call and never stored by the registry. Serializes as
/// `{"type": ..., "result": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Type of the handler that was resolved.
    #[serde(rename = "type")]
    pub handler_type: String,
    /// Return value of the handler, or `None` when the confirmation gate
    /// deferred or declined the invocation.
    pub result: Option<Value>,
}

impl ActionResult {
    /// Whether the handler actually ran during the dispatch call.
    pub fn ran(&self) -> bool {
        self.result.is_some()
    }
}
