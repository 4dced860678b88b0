use serde_json::{Map, Value};

use super::Runner;
use crate::context::ActionContext;
use crate::definition::HandlerDefinition;
use crate::error::ActionsError;
use crate::handler::ActionHandler;

/// Handler for an arbitrary, host-defined type.
///
/// Useful for custom strategies that need nothing beyond a type, some
/// defaults and a callback.
///
/// ```rust
/// use activity_actions::{ActionContext, ActionHandler, CallbackHandler, HandlerDefinition};
/// use serde_json::json;
///
/// let like = CallbackHandler::new("LikeActionHandler")
///     .with_default("count", json!(1))
///     .with_runner(|_action, def, _ctx| Ok(def.get("count").cloned().unwrap_or_default()));
///
/// let out = like
///     .handle("like", &HandlerDefinition::new("LikeActionHandler"), &ActionContext::new())
///     .unwrap();
/// assert_eq!(out, json!(1));
/// ```
#[derive(Debug, Clone)]
pub struct CallbackHandler {
    handler_type: String,
    defaults: Map<String, Value>,
    runner: Runner,
}

impl CallbackHandler {
    /// Handler of the given type with no defaults and no behavior.
    pub fn new(handler_type: impl Into<String>) -> Self {
        Self {
            handler_type: handler_type.into(),
            defaults: Map::new(),
            runner: Runner::default(),
        }
    }

    /// Attach the behavior performed by `run`.
    pub fn with_runner<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &HandlerDefinition, &ActionContext) -> Result<Value, ActionsError>
            + Send
            + Sync
            + 'static,
    {
        self.runner = Runner::new(f);
        self
    }

    /// Add a default parameter.
    pub fn with_default(mut self, key: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }

    /// Replace all default parameters.
    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }
}

impl ActionHandler for CallbackHandler {
    fn handler_type(&self) -> &str {
        &self.handler_type
    }

    fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    fn run(
        &self,
        action: &str,
        definition: &HandlerDefinition,
        ctx: &ActionContext,
    ) -> Result<Value, ActionsError> {
        self.runner.run(&self.handler_type, action, definition, ctx)
    }
}
