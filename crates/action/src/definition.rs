//! Action definitions as declared on an activity.
//!
//! An activity maps each action name to one of three shapes: a bare URL
//! string, a single `{type, ...params}` object, or an ordered list of such
//! objects naming alternative handlers. [`ActionDefinition`] is a borrowed,
//! already-classified view of that JSON; [`HandlerDefinition`] is the owned
//! object form handed to a handler once resolution picked one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field that carries the handler type in canonical definitions.
pub const TYPE_KEY: &str = "type";

/// Field carrying the URL for HTTP-style definitions.
pub const URL_KEY: &str = "url";

/// Field that routes a definition through the confirmation gate.
pub const CONFIRM_KEY: &str = "confirm";

/// Borrowed, classified view of one entry in `activity.actions`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionDefinition<'a> {
    /// A bare string, treated as a URL for the implicit HTTP handler.
    Url(&'a str),
    /// A single definition object.
    Single(&'a Map<String, Value>),
    /// Ranked alternatives, evaluated in order.
    Alternatives(&'a [Value]),
    /// `null` or any other shape. Never matches a handler.
    Inert,
}

impl<'a> ActionDefinition<'a> {
    /// Classify a raw JSON definition.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(url) => Self::Url(url),
            Value::Object(map) => Self::Single(map),
            Value::Array(items) => Self::Alternatives(items),
            _ => Self::Inert,
        }
    }

    /// Normalized candidate list: a URL or a single object becomes a
    /// one-element list, alternatives are kept in order.
    ///
    /// Entries of an alternatives list that are not objects are dropped;
    /// a bare string is only meaningful at the top level.
    pub fn candidates(self) -> Vec<Candidate<'a>> {
        match self {
            Self::Url(url) => vec![Candidate::Url(url)],
            Self::Single(map) => vec![Candidate::Object(map)],
            Self::Alternatives(items) => items
                .iter()
                .filter_map(|item| item.as_object().map(Candidate::Object))
                .collect(),
            Self::Inert => Vec::new(),
        }
    }
}

/// One normalized entry considered during resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate<'a> {
    /// Implicit HTTP definition built from a bare URL.
    Url(&'a str),
    /// Explicit definition object.
    Object(&'a Map<String, Value>),
}

impl<'a> Candidate<'a> {
    /// Handler type this candidate asks for.
    ///
    /// `url_handler_type` is the type implied by a bare URL; `type_keys` are
    /// the object fields consulted, in order. Empty or non-string values do
    /// not count.
    pub fn handler_type<S: AsRef<str>>(
        &self,
        url_handler_type: &'a str,
        type_keys: &[S],
    ) -> Option<&'a str> {
        match *self {
            Self::Url(_) => Some(url_handler_type),
            Self::Object(map) => type_keys
                .iter()
                .find_map(|key| map.get(key.as_ref()).and_then(Value::as_str))
                .filter(|ty| !ty.is_empty()),
        }
    }

    /// Owned definition for the given resolved handler type.
    pub fn to_definition(&self, handler_type: &str) -> HandlerDefinition {
        match *self {
            Self::Url(url) => HandlerDefinition::from_url(handler_type, url),
            Self::Object(map) => HandlerDefinition::from_map(map.clone()).ensure_type(handler_type),
        }
    }
}

/// Concrete definition object passed to a handler.
///
/// Wraps the JSON map so field order and unknown parameters survive
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerDefinition {
    fields: Map<String, Value>,
}

impl HandlerDefinition {
    /// Definition containing only a `type` field.
    pub fn new(handler_type: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(TYPE_KEY.to_owned(), Value::String(handler_type.into()));
        Self { fields }
    }

    /// Implicit definition for a bare URL: `{type, url}`.
    pub fn from_url(handler_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(handler_type).with(URL_KEY, Value::String(url.into()))
    }

    /// Wrap an existing map as-is.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Set a field, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Insert `type` only when the definition does not carry one yet.
    pub fn ensure_type(mut self, handler_type: &str) -> Self {
        self.fields
            .entry(TYPE_KEY)
            .or_insert_with(|| Value::String(handler_type.to_owned()));
        self
    }

    /// The `type` field, if it is a string.
    pub fn handler_type(&self) -> Option<&str> {
        self.get_str(TYPE_KEY)
    }

    /// The `url` field, if it is a string.
    pub fn url(&self) -> Option<&str> {
        self.get_str(URL_KEY)
    }

    /// Whether the `confirm` field is truthy.
    pub fn confirm(&self) -> bool {
        self.is_truthy(CONFIRM_KEY)
    }

    /// Whether `key` is present with a truthy value.
    ///
    /// `null`, `false`, `0`, `""` and absent fields are falsy; everything
    /// else, including empty objects and arrays, is truthy.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(is_truthy)
    }

    /// Whether `key` is present and not `null`.
    pub fn has(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(|v| !v.is_null())
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field access.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Shallow merge over `defaults`: defaults fill gaps, fields already
    /// present in this definition win.
    pub fn with_defaults(&self, defaults: &Map<String, Value>) -> Self {
        let mut fields = defaults.clone();
        for (key, value) in &self.fields {
            fields.insert(key.clone(), value.clone());
        }
        Self { fields }
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for HandlerDefinition {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}

impl From<HandlerDefinition> for Value {
    fn from(def: HandlerDefinition) -> Self {
        Self::Object(def.fields)
    }
}

/// JSON truthiness.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
