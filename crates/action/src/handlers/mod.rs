//! Built-in handler variants.
//!
//! Each variant is a thin specialization of [`ActionHandler`] carrying its
//! own type identifier and defaults. None of them performs any I/O: the
//! effect comes from a [`HandlerFn`] injected by the host, and without one
//! `run` fails with [`ActionsError::NotImplemented`].

mod callback;
mod embed;
mod http;
mod intent;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::ActionContext;
use crate::definition::HandlerDefinition;
use crate::error::ActionsError;
use crate::handler::HandlerFn;

pub use callback::CallbackHandler;
pub use embed::EmbedActionHandler;
pub use http::HttpActionHandler;
pub use intent::IntentActionHandler;

#[cfg(test)]
use crate::handler::ActionHandler;

/// Optional injected behavior shared by the built-in variants.
#[derive(Clone, Default)]
pub(crate) struct Runner(Option<HandlerFn>);

impl Runner {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &HandlerDefinition, &ActionContext) -> Result<Value, ActionsError>
            + Send
            + Sync
            + 'static,
    {
        let f: HandlerFn = Arc::new(f);
        Self(Some(f))
    }

    pub(crate) fn run(
        &self,
        handler_type: &str,
        action: &str,
        definition: &HandlerDefinition,
        ctx: &ActionContext,
    ) -> Result<Value, ActionsError> {
        match &self.0 {
            Some(f) => f(action, definition, ctx),
            None => Err(ActionsError::not_implemented(handler_type)),
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl From<HandlerFn> for Runner {
    fn from(f: HandlerFn) -> Self {
        Self(Some(f))
    }
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "Runner(set)" } else { "Runner(unset)" })
    }
}
