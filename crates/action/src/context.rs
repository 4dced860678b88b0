use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

/// Host-supplied context passed to handlers on every invocation.
///
/// Replaces ambient global state: anything a handler needs from the host
/// (current user, UI hooks expressed as variables, request metadata) is put
/// here explicitly by the caller of
/// [`trigger_action`](crate::ActionRegistry::trigger_action).
///
/// Cloning is cheap and clones share the same variable map, so a
/// [`PendingAction`](crate::PendingAction) held by a deferring confirmation
/// gate observes writes made after the trigger call returned.
#[derive(Clone, Default)]
pub struct ActionContext {
    variables: Arc<RwLock<Map<String, Value>>>,
}

impl ActionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with pre-populated variables.
    pub fn with_variables(mut self, vars: Map<String, Value>) -> Self {
        self.variables = Arc::new(RwLock::new(vars));
        self
    }

    /// Read a variable.
    ///
    /// Returns `None` if the variable does not exist.
    pub fn get_variable(&self, key: &str) -> Option<Value> {
        self.variables.read().get(key).cloned()
    }

    /// Write a variable, overwriting any existing value with the same key.
    pub fn set_variable(&self, key: &str, value: Value) {
        self.variables.write().insert(key.to_owned(), value);
    }

    /// Remove a variable. Returns the previous value, if any.
    pub fn remove_variable(&self, key: &str) -> Option<Value> {
        self.variables.write().shift_remove(key)
    }

    /// Snapshot of all variables.
    pub fn variables(&self) -> Map<String, Value> {
        self.variables.read().clone()
    }
}

impl fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vars = self.variables.read();
        f.debug_struct("ActionContext")
            .field("variables", &vars.keys().collect::<Vec<_>>())
            .finish()
    }
}
