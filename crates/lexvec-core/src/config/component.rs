//! Named-parameter serialization used by the host to instantiate components.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{DocStoreError, DocStoreResult};

/// A component serialized as a type tag plus its init parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub init_parameters: Map<String, Value>,
}

/// Implemented by every serializable component config.
pub trait ComponentKind: Serialize + DeserializeOwned {
    /// Fixed type tag written into `type`.
    const TYPE_NAME: &'static str;
}

impl ComponentData {
    /// Serialize a config into component data under its type tag.
    pub fn from_config<C: ComponentKind>(config: &C) -> DocStoreResult<Self> {
        let init_parameters = match serde_json::to_value(config)? {
            Value::Object(map) => map,
            other => {
                return Err(DocStoreError::deserialization(format!(
                    "component '{}' did not serialize to a mapping: {other}",
                    C::TYPE_NAME
                )))
            }
        };
        Ok(Self {
            type_name: C::TYPE_NAME.to_string(),
            init_parameters,
        })
    }

    /// Deserialize a config, checking the type tag first.
    pub fn into_config<C: ComponentKind>(&self) -> DocStoreResult<C> {
        self.expect_type(C::TYPE_NAME)?;
        serde_json::from_value(Value::Object(self.init_parameters.clone())).map_err(|e| {
            DocStoreError::deserialization(format!(
                "invalid init_parameters for '{}': {e}",
                C::TYPE_NAME
            ))
        })
    }

    /// Parse component data from an arbitrary JSON value.
    pub fn from_value(value: &Value) -> DocStoreResult<Self> {
        let Value::Object(map) = value else {
            return Err(DocStoreError::deserialization(
                "component data must be a mapping",
            ));
        };
        let type_name = match map.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(DocStoreError::deserialization("'type' must be a string")),
            None => return Err(DocStoreError::deserialization("missing 'type' in component data")),
        };
        let init_parameters = match map.get("init_parameters") {
            Some(Value::Object(params)) => params.clone(),
            Some(_) => {
                return Err(DocStoreError::deserialization(
                    "'init_parameters' must be a mapping",
                ))
            }
            None => Map::new(),
        };
        Ok(Self {
            type_name,
            init_parameters,
        })
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String(self.type_name.clone()));
        map.insert(
            "init_parameters".into(),
            Value::Object(self.init_parameters.clone()),
        );
        Value::Object(map)
    }

    /// Fail unless the type tag equals `expected`.
    pub fn expect_type(&self, expected: &str) -> DocStoreResult<()> {
        if self.type_name != expected {
            return Err(DocStoreError::deserialization(format!(
                "expected component type '{expected}', got '{}'",
                self.type_name
            )));
        }
        Ok(())
    }

    /// Extract a nested component stored under `key`.
    pub fn nested(&self, key: &str) -> DocStoreResult<ComponentData> {
        let value = self.init_parameters.get(key).ok_or_else(|| {
            DocStoreError::deserialization(format!("missing '{key}' in serialization data"))
        })?;
        let Value::Object(map) = value else {
            return Err(DocStoreError::deserialization(format!(
                "'{key}' in serialization data must be a mapping"
            )));
        };
        if !map.contains_key("type") {
            return Err(DocStoreError::deserialization(format!(
                "missing 'type' in {key}'s serialization data"
            )));
        }
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_requires_key() {
        let data = ComponentData::from_value(&json!({"type": "x", "init_parameters": {}})).unwrap();
        let err = data.nested("document_store").unwrap_err();
        assert!(err.to_string().contains("missing 'document_store'"));
    }

    #[test]
    fn nested_requires_type() {
        let data = ComponentData::from_value(&json!({
            "type": "x",
            "init_parameters": {"document_store": {"init_parameters": {}}}
        }))
        .unwrap();
        let err = data.nested("document_store").unwrap_err();
        assert!(err.to_string().contains("missing 'type'"));
    }

    #[test]
    fn missing_init_parameters_defaults_to_empty() {
        let data = ComponentData::from_value(&json!({"type": "x"})).unwrap();
        assert!(data.init_parameters.is_empty());
    }

    #[test]
    fn wrong_type_tag() {
        let data = ComponentData::from_value(&json!({"type": "x"})).unwrap();
        assert!(matches!(
            data.expect_type("y"),
            Err(DocStoreError::Deserialization { .. })
        ));
    }
}
