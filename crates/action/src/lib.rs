//! # Activity Actions
//!
//! Dispatch layer for actions declared on Activity Streams objects.
//!
//! An activity carries an `actions` map from action name to a definition:
//! a bare URL, a single `{type, ...params}` object, or an ordered list of
//! alternatives. The host registers at most one [`ActionHandler`] per type
//! in an [`ActionRegistry`], asks which actions it can serve, and triggers
//! one by name. The registry picks the first definition whose type has a
//! registered handler and invokes it, routing `confirm`-flagged definitions
//! through a [`ConfirmationGate`] first.
//!
//! This crate performs no network or UI work. The built-in handlers
//! ([`HttpActionHandler`], [`EmbedActionHandler`], [`IntentActionHandler`])
//! only carry a type and defaults; their effect is a callback the host
//! injects.
//!
//! ## Core Types
//!
//! - [`ActionRegistry`] — type → handler map, resolution and dispatch
//! - [`ActionHandler`] — capability contract for handlers
//! - [`ActivityObject`] — read-only view of an activity document
//! - [`HandlerDefinition`] — the definition object a handler receives
//! - [`ConfirmationGate`] / [`PendingAction`] — the confirm-then-handle step
//! - [`ActionResult`] — `{type, result}` reported by [`ActionRegistry::dispatch`]
//! - [`ActionsError`] — registration and invocation failures
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use activity_actions::prelude::*;
//! use serde_json::json;
//!
//! let mut registry = ActionRegistry::new();
//! registry.register_handler(Arc::new(HttpActionHandler::with_runner(|action, def, _ctx| {
//!     Ok(json!({ "action": action, "fetch": def.url() }))
//! })))?;
//!
//! let activity = ActivityObject::from(json!({
//!     "actions": { "view": "http://example.org/post/1" }
//! }));
//!
//! assert_eq!(registry.list_actions_with_handlers(&activity), vec!["view"]);
//!
//! let outcome = registry.dispatch("view", &activity, &ActionContext::new())?.unwrap();
//! assert_eq!(outcome.handler_type, "HttpActionHandler");
//! assert_eq!(outcome.result.unwrap()["fetch"], "http://example.org/post/1");
//! # Ok::<(), ActionsError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Read-only view over activity documents.
pub mod activity;
/// Registry configuration.
pub mod config;
/// Confirmation gate and pending invocations.
pub mod confirm;
/// Host context passed to handlers.
pub mod context;
/// Action definition shapes and normalization.
pub mod definition;
/// Error taxonomy for registration and invocation.
pub mod error;
/// Handler capability contract.
pub mod handler;
/// Built-in handler variants.
pub mod handlers;
/// Convenience re-exports for hosts.
pub mod prelude;
/// Handler registry, resolution and dispatch.
pub mod registry;
/// Dispatch result type.
pub mod result;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use activity::ActivityObject;
pub use config::RegistryConfig;
pub use confirm::{ConfirmationGate, ConfirmationQueue, ImmediateConfirmation, PendingAction};
pub use context::ActionContext;
pub use definition::{ActionDefinition, HandlerDefinition};
pub use error::ActionsError;
pub use handler::{ActionHandler, HandlerFn};
pub use handlers::{CallbackHandler, EmbedActionHandler, HttpActionHandler, IntentActionHandler};
pub use registry::{ActionRegistry, ResolvedAction};
pub use result::ActionResult;
