use serde_json::Value;

use super::Runner;
use crate::context::ActionContext;
use crate::definition::HandlerDefinition;
use crate::error::ActionsError;
use crate::handler::ActionHandler;

/// Client performs an action based on local configuration or user
/// preferences, e.g. by launching an external application.
#[derive(Debug, Clone, Default)]
pub struct IntentActionHandler {
    runner: Runner,
}

impl IntentActionHandler {
    /// Registry key for this handler.
    pub const TYPE: &'static str = "IntentActionHandler";

    /// Handler with no behavior attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler that performs `f` when run.
    pub fn with_runner<F>(f: F) -> Self
    where
        F: Fn(&str, &HandlerDefinition, &ActionContext) -> Result<Value, ActionsError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            runner: Runner::new(f),
        }
    }
}

impl ActionHandler for IntentActionHandler {
    fn handler_type(&self) -> &str {
        Self::TYPE
    }

    fn run(
        &self,
        action: &str,
        definition: &HandlerDefinition,
        ctx: &ActionContext,
    ) -> Result<Value, ActionsError> {
        self.runner.run(Self::TYPE, action, definition, ctx)
    }
}
