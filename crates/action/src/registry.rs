use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::activity::ActivityObject;
use crate::config::RegistryConfig;
use crate::confirm::{ConfirmationGate, ImmediateConfirmation, PendingAction};
use crate::context::ActionContext;
use crate::definition::{ActionDefinition, Candidate, HandlerDefinition};
use crate::error::ActionsError;
use crate::handler::ActionHandler;
use crate::result::ActionResult;

/// Registry mapping handler types to handler instances, and the dispatcher
/// that resolves an activity's actions against it.
///
/// At most one handler is registered per type; registering another with
/// the same type replaces it. There is no removal: handlers live as long
/// as the registry.
///
/// # Example
///
/// ```rust
/// use activity_actions::{ActionContext, ActionRegistry, ActivityObject, EmbedActionHandler};
/// use serde_json::{Value, json};
/// use std::sync::Arc;
///
/// let mut registry = ActionRegistry::new();
/// registry
///     .register_handler(Arc::new(EmbedActionHandler::with_runner(|_, _, _| Ok(Value::Null))))
///     .unwrap();
///
/// let activity = ActivityObject::from(json!({
///     "actions": {
///         "open": "http://example.com",
///         "preview": [{ "type": "HttpActionHandler" }, { "type": "EmbedActionHandler" }]
///     }
/// }));
///
/// assert_eq!(registry.list_actions_with_handlers(&activity), vec!["preview"]);
/// assert!(registry.trigger_action("preview", &activity, &ActionContext::new()).unwrap());
/// assert!(!registry.trigger_action("open", &activity, &ActionContext::new()).unwrap());
/// ```
pub struct ActionRegistry {
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
    confirmation: Arc<dyn ConfirmationGate>,
    config: RegistryConfig,
}

/// A definition picked by resolution together with its handler.
#[derive(Debug, Clone)]
pub struct ResolvedAction {
    /// Handler registered for the definition's type.
    pub handler: Arc<dyn ActionHandler>,
    /// The selected definition, with implicit URL coercion applied.
    pub definition: HandlerDefinition,
}

impl ResolvedAction {
    /// Type of the resolved handler.
    pub fn handler_type(&self) -> &str {
        self.handler.handler_type()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            confirmation: Arc::new(ImmediateConfirmation),
            config: RegistryConfig::default(),
        }
    }
}

impl ActionRegistry {
    /// Create an empty registry that confirms everything immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with custom definition parsing rules.
    pub fn with_config(config: RegistryConfig) -> Result<Self, ActionsError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Install a confirmation gate, replacing the current one.
    pub fn with_confirmation<G>(self, gate: G) -> Self
    where
        G: ConfirmationGate + 'static,
    {
        self.with_shared_confirmation(Arc::new(gate))
    }

    /// Install a confirmation gate the host keeps a handle to.
    pub fn with_shared_confirmation(mut self, gate: Arc<dyn ConfirmationGate>) -> Self {
        self.confirmation = gate;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a handler under its type. Overwrites any existing handler
    /// with the same type.
    ///
    /// # Errors
    ///
    /// [`ActionsError::InvalidHandler`] if the handler's type is empty.
    pub fn register_handler(&mut self, handler: Arc<dyn ActionHandler>) -> Result<(), ActionsError> {
        let handler_type = handler.handler_type();
        if handler_type.is_empty() {
            return Err(ActionsError::invalid_handler(
                "handler is missing its type",
            ));
        }
        let handler_type = handler_type.to_owned();
        tracing::info!(handler_type = %handler_type, "registered action handler");
        if self.handlers.insert(handler_type.clone(), handler).is_some() {
            tracing::debug!(handler_type = %handler_type, "replaced existing action handler");
        }
        Ok(())
    }

    /// Look up a handler by type.
    pub fn get(&self, handler_type: &str) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.get(handler_type)
    }

    /// Check whether a handler is registered for the given type.
    pub fn contains(&self, handler_type: &str) -> bool {
        self.handlers.contains_key(handler_type)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered handler types, sorted.
    pub fn handler_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Names of the activity's actions that at least one registered handler
    /// can serve, in declaration order.
    ///
    /// Never invokes a handler and never fails: malformed definitions are
    /// simply left out.
    pub fn list_actions_with_handlers(&self, activity: &ActivityObject) -> Vec<String> {
        let Some(actions) = activity.actions() else {
            return Vec::new();
        };
        actions
            .iter()
            .filter(|(_, raw)| self.first_match(ActionDefinition::from_value(raw)).is_some())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Pick the definition and handler that [`trigger_action`](Self::trigger_action)
    /// would use, without invoking anything.
    ///
    /// Among alternatives the first entry with a registered type wins, even
    /// if a later entry's handler was registered earlier.
    pub fn resolve(&self, action: &str, activity: &ActivityObject) -> Option<ResolvedAction> {
        let Some(raw) = activity.action(action) else {
            tracing::trace!(action, "action not declared on activity");
            return None;
        };
        let Some((candidate, handler)) = self.first_match(ActionDefinition::from_value(raw)) else {
            tracing::debug!(action, "no registered handler for action");
            return None;
        };
        let definition = candidate.to_definition(handler.handler_type());
        tracing::debug!(
            action,
            handler_type = %handler.handler_type(),
            "resolved action handler"
        );
        Some(ResolvedAction {
            handler: Arc::clone(handler),
            definition,
        })
    }

    /// Hand a pending invocation to the confirmation gate.
    ///
    /// With the default gate this runs the handler immediately and returns
    /// its value; a deferring gate returns `Ok(None)`.
    pub fn confirm_action(&self, pending: PendingAction) -> Result<Option<Value>, ActionsError> {
        tracing::debug!(
            action = %pending.action(),
            handler_type = %pending.handler_type(),
            "routing action through confirmation gate"
        );
        self.confirmation.confirm(pending)
    }

    /// Resolve and invoke an action, returning which handler was picked and
    /// what it returned.
    ///
    /// `Ok(None)` when nothing resolved. When the definition asks for
    /// confirmation the returned `result` is whatever the gate reports,
    /// `None` if it deferred or declined.
    ///
    /// Handler errors propagate unchanged.
    pub fn dispatch(
        &self,
        action: &str,
        activity: &ActivityObject,
        ctx: &ActionContext,
    ) -> Result<Option<ActionResult>, ActionsError> {
        let Some(resolved) = self.resolve(action, activity) else {
            return Ok(None);
        };
        let handler_type = resolved.handler_type().to_owned();
        let effective = resolved.definition.with_defaults(resolved.handler.defaults());
        let pending = PendingAction::new(resolved.handler, action, resolved.definition, ctx.clone());

        let result = if effective.is_truthy(&self.config.confirm_key) {
            self.confirm_action(pending)?
        } else {
            Some(pending.invoke()?)
        };

        Ok(Some(ActionResult {
            handler_type,
            result,
        }))
    }

    /// Resolve and invoke an action.
    ///
    /// Returns `Ok(true)` when a handler was resolved and its invocation was
    /// initiated, `Ok(false)` when the activity has no such action or none
    /// of its definitions has a registered handler. With a deferring
    /// confirmation gate the handler may not have run yet when this returns.
    pub fn trigger_action(
        &self,
        action: &str,
        activity: &ActivityObject,
        ctx: &ActionContext,
    ) -> Result<bool, ActionsError> {
        self.dispatch(action, activity, ctx)
            .map(|result| result.is_some())
    }

    fn first_match<'a>(
        &'a self,
        definition: ActionDefinition<'a>,
    ) -> Option<(Candidate<'a>, &'a Arc<dyn ActionHandler>)> {
        definition.candidates().into_iter().find_map(|candidate| {
            let handler_type =
                candidate.handler_type(&self.config.url_handler_type, self.config.type_keys.as_slice());
            match handler_type.and_then(|ty| self.handlers.get(ty)) {
                Some(handler) => Some((candidate, handler)),
                None => {
                    tracing::trace!(?handler_type, "skipping unmatched definition");
                    None
                }
            }
        })
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("count", &self.handlers.len())
            .field("types", &self.handler_types())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{CallbackHandler, EmbedActionHandler, HttpActionHandler};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn noop(handler_type: &str) -> Arc<dyn ActionHandler> {
        Arc::new(CallbackHandler::new(handler_type).with_runner(|_, _, _| Ok(Value::Null)))
    }

    #[test]
    fn empty_registry() {
        let reg = ActionRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert!(reg.get("anything").is_none());
    }

    #[test]
    fn register_and_get() {
        let mut reg = ActionRegistry::new();
        reg.register_handler(Arc::new(HttpActionHandler::new())).unwrap();

        assert_eq!(reg.len(), 1);
        assert!(reg.contains("HttpActionHandler"));
        assert_eq!(
            reg.get("HttpActionHandler").unwrap().handler_type(),
            "HttpActionHandler"
        );
    }

    #[test]
    fn overwrite_existing() {
        let mut reg = ActionRegistry::new();
        let first = noop("x");
        let second = noop("x");
        reg.register_handler(Arc::clone(&first)).unwrap();
        reg.register_handler(Arc::clone(&second)).unwrap();

        assert_eq!(reg.len(), 1);
        assert!(Arc::ptr_eq(reg.get("x").unwrap(), &second));
    }

    #[test]
    fn empty_type_is_invalid() {
        let mut reg = ActionRegistry::new();
        let err = reg.register_handler(noop("")).unwrap_err();
        assert!(err.is_registration_error());
        assert!(reg.is_empty());
    }

    #[test]
    fn handler_types_sorted() {
        let mut reg = ActionRegistry::new();
        reg.register_handler(noop("b")).unwrap();
        reg.register_handler(noop("a")).unwrap();
        assert_eq!(reg.handler_types(), vec!["a", "b"]);
    }

    #[test]
    fn resolve_coerces_bare_url() {
        let mut reg = ActionRegistry::new();
        reg.register_handler(Arc::new(HttpActionHandler::new())).unwrap();
        let activity = ActivityObject::from(json!({"actions": {"open": "http://x"}}));

        let resolved = reg.resolve("open", &activity).unwrap();
        assert_eq!(resolved.handler_type(), "HttpActionHandler");
        assert_eq!(
            Value::from(resolved.definition),
            json!({"type": "HttpActionHandler", "url": "http://x"})
        );
    }

    #[test]
    fn resolve_uses_configured_url_handler() {
        let config = RegistryConfig {
            url_handler_type: "LinkActionHandler".into(),
            ..RegistryConfig::default()
        };
        let mut reg = ActionRegistry::with_config(config).unwrap();
        reg.register_handler(noop("LinkActionHandler")).unwrap();
        let activity = ActivityObject::from(json!({"actions": {"open": "http://x"}}));

        let resolved = reg.resolve("open", &activity).unwrap();
        assert_eq!(resolved.definition.handler_type(), Some("LinkActionHandler"));
    }

    #[test]
    fn with_config_rejects_invalid() {
        let config = RegistryConfig {
            confirm_key: String::new(),
            ..RegistryConfig::default()
        };
        assert!(matches!(
            ActionRegistry::with_config(config),
            Err(ActionsError::Config(_))
        ));
    }

    #[test]
    fn dispatch_reports_handler_and_result() {
        let mut reg = ActionRegistry::new();
        reg.register_handler(Arc::new(EmbedActionHandler::with_runner(|action, _, _| {
            Ok(json!(format!("embedded {action}")))
        })))
        .unwrap();
        let activity = ActivityObject::from(json!({
            "actions": {"preview": {"type": "EmbedActionHandler"}}
        }));

        let result = reg
            .dispatch("preview", &activity, &ActionContext::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            result,
            ActionResult {
                handler_type: "EmbedActionHandler".into(),
                result: Some(json!("embedded preview")),
            }
        );
    }

    #[test]
    fn handler_errors_propagate() {
        let mut reg = ActionRegistry::new();
        reg.register_handler(Arc::new(HttpActionHandler::new())).unwrap();
        let activity = ActivityObject::from(json!({"actions": {"open": "http://x"}}));

        let err = reg
            .trigger_action("open", &activity, &ActionContext::new())
            .unwrap_err();
        assert_eq!(err, ActionsError::not_implemented("HttpActionHandler"));
    }

    #[test]
    fn debug_format() {
        let mut reg = ActionRegistry::new();
        reg.register_handler(noop("test")).unwrap();
        let debug = format!("{reg:?}");
        assert!(debug.contains("ActionRegistry"));
        assert!(debug.contains("count: 1"));
    }
}
