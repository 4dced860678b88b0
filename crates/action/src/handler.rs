//! The capability contract every action handler implements.

use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};

use crate::context::ActionContext;
use crate::definition::HandlerDefinition;
use crate::error::ActionsError;

/// Callback performing the effect of a handler.
///
/// Built-in handlers never do network or UI work themselves; the host
/// injects one of these to give them behavior.
pub type HandlerFn =
    Arc<dyn Fn(&str, &HandlerDefinition, &ActionContext) -> Result<Value, ActionsError> + Send + Sync>;

/// An implementation capable of executing one action-definition type.
///
/// Registered in an [`ActionRegistry`](crate::ActionRegistry) under
/// [`handler_type`](Self::handler_type); at most one handler per type is
/// resolvable at a time.
///
/// Invocation is two-step: the registry calls [`handle`](Self::handle),
/// which by default merges the definition over [`defaults`](Self::defaults)
/// and forwards to [`run`](Self::run). Override `handle` to validate or
/// normalize the definition before delegating.
///
/// # Object Safety
///
/// This trait is object-safe; the registry stores `Arc<dyn ActionHandler>`.
///
/// # Example
///
/// ```rust
/// use activity_actions::{ActionContext, ActionHandler, ActionsError, HandlerDefinition};
/// use serde_json::{Value, json};
///
/// struct Share;
///
/// impl ActionHandler for Share {
///     fn handler_type(&self) -> &str {
///         "ShareActionHandler"
///     }
///
///     fn run(
///         &self,
///         action: &str,
///         definition: &HandlerDefinition,
///         _ctx: &ActionContext,
///     ) -> Result<Value, ActionsError> {
///         Ok(json!({ "shared": action, "via": definition.get_str("network") }))
///     }
/// }
///
/// let def = HandlerDefinition::new("ShareActionHandler").with("network", json!("mastodon"));
/// let out = Share.handle("share", &def, &ActionContext::new()).unwrap();
/// assert_eq!(out["via"], "mastodon");
/// ```
pub trait ActionHandler: Send + Sync + 'static {
    /// Stable, non-empty identifier used as the registry key.
    fn handler_type(&self) -> &str;

    /// Parameters merged into every invocation of this handler.
    fn defaults(&self) -> &Map<String, Value> {
        empty_defaults()
    }

    /// Perform the effect.
    ///
    /// The default implementation fails with
    /// [`ActionsError::NotImplemented`].
    fn run(
        &self,
        action: &str,
        definition: &HandlerDefinition,
        ctx: &ActionContext,
    ) -> Result<Value, ActionsError> {
        let _ = (action, definition, ctx);
        Err(ActionsError::not_implemented(self.handler_type()))
    }

    /// Entry point used by the registry.
    ///
    /// Shallow-merges `definition` over a copy of [`defaults`](Self::defaults)
    /// (explicit definition fields win) and calls [`run`](Self::run).
    fn handle(
        &self,
        action: &str,
        definition: &HandlerDefinition,
        ctx: &ActionContext,
    ) -> Result<Value, ActionsError> {
        let merged = definition.with_defaults(self.defaults());
        self.run(action, &merged, ctx)
    }
}

fn empty_defaults() -> &'static Map<String, Value> {
    static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

impl std::fmt::Debug for dyn ActionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionHandler")
            .field("type", &self.handler_type())
            .finish()
    }
}
