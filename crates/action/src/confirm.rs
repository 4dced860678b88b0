//! Confirmation gate between resolution and invocation.
//!
//! When a resolved definition has a truthy `confirm` field the registry does
//! not call the handler itself. It packages the invocation as a
//! [`PendingAction`] and hands it to the registry's [`ConfirmationGate`],
//! which decides whether and when the action runs.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::context::ActionContext;
use crate::definition::HandlerDefinition;
use crate::error::ActionsError;
use crate::handler::ActionHandler;

/// A resolved handler invocation that has not run yet.
///
/// Owns everything it needs, so a gate may store it and run it after
/// [`trigger_action`](crate::ActionRegistry::trigger_action) has returned.
/// Dropping it declines the action.
pub struct PendingAction {
    handler: Arc<dyn ActionHandler>,
    action: String,
    definition: HandlerDefinition,
    context: ActionContext,
}

impl PendingAction {
    pub(crate) fn new(
        handler: Arc<dyn ActionHandler>,
        action: impl Into<String>,
        definition: HandlerDefinition,
        context: ActionContext,
    ) -> Self {
        Self {
            handler,
            action: action.into(),
            definition,
            context,
        }
    }

    /// Name of the action being triggered.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Definition the handler will receive.
    pub fn definition(&self) -> &HandlerDefinition {
        &self.definition
    }

    /// Type of the resolved handler.
    pub fn handler_type(&self) -> &str {
        self.handler.handler_type()
    }

    /// Context the handler will receive.
    pub fn context(&self) -> &ActionContext {
        &self.context
    }

    /// Run the handler: `handler.handle(action, definition, context)`.
    pub fn invoke(self) -> Result<Value, ActionsError> {
        tracing::debug!(
            action = %self.action,
            handler_type = %self.handler.handler_type(),
            "invoking action handler"
        );
        self.handler
            .handle(&self.action, &self.definition, &self.context)
    }
}

impl fmt::Debug for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAction")
            .field("action", &self.action)
            .field("handler_type", &self.handler.handler_type())
            .field("definition", &self.definition)
            .finish()
    }
}

/// Decides whether and when a confirm-flagged action runs.
///
/// Return `Ok(Some(value))` when the action ran synchronously,
/// `Ok(None)` when it was deferred or declined. Errors from a synchronous
/// invocation should be propagated unchanged.
///
/// Closures of the right shape implement this trait:
///
/// ```rust
/// use activity_actions::{ActionRegistry, ActionsError, PendingAction};
/// use serde_json::Value;
///
/// // Decline everything that asks for confirmation.
/// let registry = ActionRegistry::new().with_confirmation(
///     |pending: PendingAction| -> Result<Option<Value>, ActionsError> {
///         drop(pending);
///         Ok(None)
///     },
/// );
/// # let _ = registry;
/// ```
pub trait ConfirmationGate: Send + Sync {
    /// Handle one pending action.
    fn confirm(&self, pending: PendingAction) -> Result<Option<Value>, ActionsError>;
}

impl<F> ConfirmationGate for F
where
    F: Fn(PendingAction) -> Result<Option<Value>, ActionsError> + Send + Sync,
{
    fn confirm(&self, pending: PendingAction) -> Result<Option<Value>, ActionsError> {
        self(pending)
    }
}

/// Gate that confirms everything by running it on the spot.
///
/// Installed by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateConfirmation;

impl ConfirmationGate for ImmediateConfirmation {
    fn confirm(&self, pending: PendingAction) -> Result<Option<Value>, ActionsError> {
        pending.invoke().map(Some)
    }
}

/// Gate that parks every pending action until the host decides.
///
/// Share it with the registry through an `Arc` (see
/// [`with_shared_confirmation`](crate::ActionRegistry::with_shared_confirmation))
/// and drain it from the UI side: [`approve_next`](Self::approve_next) runs the oldest action,
/// [`decline_next`](Self::decline_next) drops it.
#[derive(Default)]
pub struct ConfirmationQueue {
    pending: Mutex<VecDeque<PendingAction>>,
}

impl ConfirmationQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions awaiting a decision.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether nothing is awaiting a decision.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Run the oldest pending action. `None` if the queue is empty.
    pub fn approve_next(&self) -> Option<Result<Value, ActionsError>> {
        // Pop before invoking so the handler may trigger further actions.
        let next = self.pending.lock().pop_front();
        next.map(PendingAction::invoke)
    }

    /// Drop the oldest pending action without running it.
    pub fn decline_next(&self) -> Option<PendingAction> {
        self.pending.lock().pop_front()
    }

    /// Take every pending action, leaving the queue empty.
    pub fn drain(&self) -> Vec<PendingAction> {
        self.pending.lock().drain(..).collect()
    }
}

impl ConfirmationGate for ConfirmationQueue {
    fn confirm(&self, pending: PendingAction) -> Result<Option<Value>, ActionsError> {
        tracing::debug!(
            action = %pending.action(),
            handler_type = %pending.handler_type(),
            "queued action for confirmation"
        );
        self.pending.lock().push_back(pending);
        Ok(None)
    }
}

impl fmt::Debug for ConfirmationQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationQueue")
            .field("pending", &self.len())
            .finish()
    }
}
