//! Convenience re-exports for hosts and handler authors.
//!
//! ```rust
//! use activity_actions::prelude::*;
//! ```

pub use crate::activity::ActivityObject;
pub use crate::confirm::{ConfirmationGate, ConfirmationQueue, PendingAction};
pub use crate::context::ActionContext;
pub use crate::definition::HandlerDefinition;
pub use crate::error::ActionsError;
pub use crate::handler::ActionHandler;
pub use crate::handlers::{CallbackHandler, EmbedActionHandler, HttpActionHandler, IntentActionHandler};
pub use crate::registry::ActionRegistry;
pub use crate::result::ActionResult;
