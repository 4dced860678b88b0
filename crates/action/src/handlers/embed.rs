use serde_json::Value;

use super::Runner;
use crate::context::ActionContext;
use crate::definition::HandlerDefinition;
use crate::error::ActionsError;
use crate::handler::ActionHandler;

/// Client presents an embed for the activity using inlined content.
#[derive(Debug, Clone, Default)]
pub struct EmbedActionHandler {
    runner: Runner,
}

impl EmbedActionHandler {
    /// Registry key for this handler.
    pub const TYPE: &'static str = "EmbedActionHandler";

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

impl ActionHandler for EmbedActionHandler {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn runner_receives_definition_unchanged() {
        let handler = EmbedActionHandler::with_runner(|_action, def, _ctx| {
            Ok(def.get("content").cloned().unwrap_or_default())
        });
        let def = HandlerDefinition::new(EmbedActionHandler::TYPE).with("content", json!("<p>hi</p>"));
        let out = handler.handle("preview", &def, &ActionContext::new()).unwrap();
        assert_eq!(out, json!("<p>hi</p>"));
    }
}
