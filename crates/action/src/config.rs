//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::definition::{CONFIRM_KEY, TYPE_KEY};
use crate::error::ActionsError;
use crate::handlers::HttpActionHandler;

/// Legacy field name some producers use instead of `type`.
pub const LEGACY_TYPE_KEY: &str = "objectType";

/// Tunables for how a registry reads action definitions.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```rust
/// use activity_actions::RegistryConfig;
///
/// let config = RegistryConfig::from_toml_str(r#"
///     url_handler_type = "LinkActionHandler"
/// "#).unwrap();
/// assert_eq!(config.url_handler_type, "LinkActionHandler");
/// assert_eq!(config.confirm_key, "confirm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Handler type implied by a bare URL definition.
    pub url_handler_type: String,
    /// Definition fields that name the handler type, checked in order.
    pub type_keys: Vec<String>,
    /// Definition field that routes an action through the confirmation gate.
    pub confirm_key: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url_handler_type: HttpActionHandler::TYPE.to_owned(),
            type_keys: vec![TYPE_KEY.to_owned(), LEGACY_TYPE_KEY.to_owned()],
            confirm_key: CONFIRM_KEY.to_owned(),
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ActionsError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ActionsError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that no field is empty.
    pub fn validate(&self) -> Result<(), ActionsError> {
        if self.url_handler_type.is_empty() {
            return Err(ActionsError::config("url_handler_type must not be empty"));
        }
        if self.type_keys.is_empty() || self.type_keys.iter().any(String::is_empty) {
            return Err(ActionsError::config(
                "type_keys must list at least one non-empty field name",
            ));
        }
        if self.confirm_key.is_empty() {
            return Err(ActionsError::config("confirm_key must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.url_handler_type, "HttpActionHandler");
        assert_eq!(config.type_keys, vec!["type", "objectType"]);
        assert_eq!(config.confirm_key, "confirm");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(RegistryConfig::from_toml_str("").unwrap(), RegistryConfig::default());
    }

    #[test]
    fn overrides_from_toml() {
        let config = RegistryConfig::from_toml_str(
            r#"
            type_keys = ["kind"]
            confirm_key = "ask"
            "#,
        )
        .unwrap();
        assert_eq!(config.type_keys, vec!["kind"]);
        assert_eq!(config.confirm_key, "ask");
        assert_eq!(config.url_handler_type, "HttpActionHandler");
    }

    #[test]
    fn rejects_empty_type_keys() {
        let err = RegistryConfig::from_toml_str("type_keys = []").unwrap_err();
        assert!(matches!(err, ActionsError::Config(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = RegistryConfig::from_toml_str("url_handler_type = 3").unwrap_err();
        assert!(matches!(err, ActionsError::Config(_)));
    }
}
