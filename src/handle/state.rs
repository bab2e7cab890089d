use super::Handle;
use crate::{error::StateError, key::Key, registry::Registry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted form of a channel binding
///
/// Only the channel identity is stored, never its value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleState {
    /// Channel type
    #[serde(rename = "typeID", default)]
    pub type_id: String,
    /// Channel name
    #[serde(rename = "nameID", default)]
    pub name_id: String,
}

impl HandleState {
    /// Parses a binding from JSON text
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the binding as JSON text
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Renders the binding as a JSON document
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "typeID": self.type_id,
            "nameID": self.name_id,
        })
    }

    // Missing or non-string fields read as empty, like an unset key.
    fn from_value_lenient(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            type_id: field("typeID"),
            name_id: field("nameID"),
        }
    }

    fn validate(self) -> Result<Self, StateError> {
        if self.type_id.is_empty() {
            return Err(StateError::EmptyField("typeID"));
        }
        if self.name_id.is_empty() {
            return Err(StateError::EmptyField("nameID"));
        }
        Ok(self)
    }
}

impl Handle {
    /// The binding to persist for this handle, taken from its keys
    pub fn state(&self) -> HandleState {
        HandleState {
            type_id: self.type_key.as_str().to_owned(),
            name_id: self.name_key.as_str().to_owned(),
        }
    }

    /// Saves this binding as `{"typeID": .., "nameID": ..}`
    pub fn save_state(&self) -> Value {
        self.state().to_value()
    }
}

impl Registry {
    /// Resolves a persisted binding to a handle
    ///
    /// Goes through [Registry::handle], so an unseen binding creates its
    /// channel and fires the channel list changed listeners.
    pub fn load_handle(&self, state: &HandleState) -> Handle {
        self.handle(Key::new(&state.type_id), Key::new(&state.name_id))
    }

    /// Resolves a document produced by [Handle::save_state]
    ///
    /// Malformed documents resolve to an invalid handle.
    pub fn load_state(&self, document: &Value) -> Handle {
        let state = HandleState::from_value_lenient(document);
        if state.type_id.is_empty() || state.name_id.is_empty() {
            tracing::debug!(%document, "channel binding without type or name");
        }
        self.load_handle(&state)
    }

    /// Like [Registry::load_state] but rejects malformed documents
    pub fn try_load_state(&self, document: &Value) -> Result<Handle, StateError> {
        let state = HandleState::deserialize(document)?.validate()?;
        Ok(self.load_handle(&state))
    }
}
