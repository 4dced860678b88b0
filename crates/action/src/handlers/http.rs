use serde_json::{Map, Value};

use super::Runner;
use crate::context::ActionContext;
use crate::definition::{HandlerDefinition, URL_KEY};
use crate::error::ActionsError;
use crate::handler::ActionHandler;

/// Client performs an HTTP request to a URL.
///
/// This is the handler implied by a bare URL string definition. Defaults
/// are `{method: "GET", target: "DEFAULT"}`; a `url` field is required.
#[derive(Debug, Clone)]
pub struct HttpActionHandler {
    defaults: Map<String, Value>,
    runner: Runner,
}

impl HttpActionHandler {
    /// Registry key for this handler.
    pub const TYPE: &'static str = "HttpActionHandler";

    /// Handler with no behavior attached.
    pub fn new() -> Self {
        let mut defaults = Map::new();
        defaults.insert("method".into(), Value::String("GET".into()));
        defaults.insert("target".into(), Value::String("DEFAULT".into()));
        Self {
            defaults,
            runner: Runner::default(),
        }
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
            ..Self::new()
        }
    }

    /// Replace a default parameter.
    pub fn with_default(mut self, key: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }

    /// Handle a raw JSON definition.
    ///
    /// A bare string is coerced to `{type: "HttpActionHandler", url}`; an
    /// object is used as-is. Any other shape has no `url` and is rejected.
    pub fn handle_value(
        &self,
        action: &str,
        definition: &Value,
        ctx: &ActionContext,
    ) -> Result<Value, ActionsError> {
        let definition = match definition {
            Value::String(url) => HandlerDefinition::from_url(Self::TYPE, url.as_str()),
            Value::Object(map) => HandlerDefinition::from_map(map.clone()),
            _ => return Err(ActionsError::missing_field(Self::TYPE, URL_KEY)),
        };
        self.handle(action, &definition, ctx)
    }
}

impl Default for HttpActionHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionHandler for HttpActionHandler {
    fn handler_type(&self) -> &str {
        Self::TYPE
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
        self.runner.run(Self::TYPE, action, definition, ctx)
    }

    fn handle(
        &self,
        action: &str,
        definition: &HandlerDefinition,
        ctx: &ActionContext,
    ) -> Result<Value, ActionsError> {
        if !definition.has(URL_KEY) {
            return Err(ActionsError::missing_field(Self::TYPE, URL_KEY));
        }
        let merged = definition.with_defaults(&self.defaults);
        self.run(action, &merged, ctx)
    }
}
