/// Error type for registry and handler operations.
///
/// Every variant is raised synchronously at the call that violates the
/// contract. The registry never catches or retries them; they propagate to
/// the caller of [`register_handler`](crate::ActionRegistry::register_handler),
/// [`trigger_action`](crate::ActionRegistry::trigger_action) or
/// [`ActionHandler::handle`](crate::ActionHandler::handle).
///
/// Malformed action definitions inside an activity are *not* errors; they
/// are skipped during resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ActionsError {
    /// A handler was rejected at registration time.
    #[error("invalid handler: {0}")]
    InvalidHandler(String),

    /// A handler was invoked without a parameter it requires.
    #[error("`{field}` property is required for {handler_type}")]
    MissingRequiredField {
        /// Type of the handler that rejected the definition.
        handler_type: String,
        /// Name of the missing field.
        field: String,
    },

    /// The handler has no `run` behavior.
    #[error("{handler_type} run method not implemented")]
    NotImplemented {
        /// Type of the handler that was invoked.
        handler_type: String,
    },

    /// Registry configuration could not be loaded or is inconsistent.
    #[error("config: {0}")]
    Config(String),
}

impl ActionsError {
    /// Create an invalid-handler error.
    pub fn invalid_handler(msg: impl Into<String>) -> Self {
        Self::InvalidHandler(msg.into())
    }

    /// Create a missing-field error for the given handler type.
    pub fn missing_field(handler_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            handler_type: handler_type.into(),
            field: field.into(),
        }
    }

    /// Create a not-implemented error for the given handler type.
    pub fn not_implemented(handler_type: impl Into<String>) -> Self {
        Self::NotImplemented {
            handler_type: handler_type.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns `true` if this error was raised while registering a handler.
    pub fn is_registration_error(&self) -> bool {
        matches!(self, Self::InvalidHandler(_))
    }

    /// Handler type the error refers to, if any.
    pub fn handler_type(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { handler_type, .. } | Self::NotImplemented { handler_type } => {
                Some(handler_type)
            }
            _ => None,
        }
    }
}
