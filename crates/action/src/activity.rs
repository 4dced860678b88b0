use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field of an activity holding its action definitions.
pub const ACTIONS_KEY: &str = "actions";

/// Read-only view over an activity document.
///
/// The registry only reads the `actions` field, a map from action name to
/// definition. Every other field is opaque. An `actions` value that is not
/// an object is treated as absent.
///
/// ```rust
/// use activity_actions::ActivityObject;
/// use serde_json::json;
///
/// let activity = ActivityObject::from(json!({
///     "verb": "post",
///     "actions": { "open": "http://example.com", "share": { "type": "ShareActionHandler" } }
/// }));
/// assert_eq!(activity.action_names().collect::<Vec<_>>(), vec!["open", "share"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityObject(Value);

impl ActivityObject {
    /// Wrap a JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `actions` map, if present and an object.
    pub fn actions(&self) -> Option<&Map<String, Value>> {
        self.0.get(ACTIONS_KEY).and_then(Value::as_object)
    }

    /// Raw definition for one action.
    pub fn action(&self, name: &str) -> Option<&Value> {
        self.actions().and_then(|actions| actions.get(name))
    }

    /// Declared action names, in declaration order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions()
            .into_iter()
            .flat_map(|actions| actions.keys().map(String::as_str))
    }

    /// Borrow the underlying document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the underlying document.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ActivityObject {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn preserves_declaration_order() {
        let activity = ActivityObject::from(json!({
            "actions": { "zeta": "http://z", "alpha": "http://a", "mid": null }
        }));
        let names: Vec<_> = activity.action_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"actions": null}))]
    #[case(json!({"actions": ["http://x"]}))]
    #[case(json!("not an object"))]
    fn missing_or_malformed_actions(#[case] doc: Value) {
        let activity = ActivityObject::new(doc);
        assert!(activity.actions().is_none());
        assert!(activity.action("anything").is_none());
        assert_eq!(activity.action_names().count(), 0);
    }

    #[test]
    fn deserializes_transparently() {
        let activity: ActivityObject =
            serde_json::from_str(r#"{"actions": {"open": "http://x"}}"#).unwrap();
        assert_eq!(activity.action("open"), Some(&json!("http://x")));
        assert_eq!(activity.into_value(), json!({"actions": {"open": "http://x"}}));
    }
}
