use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Application metadata (`appinfo.json` or `package.json`).
///
/// Stored as an opaque mapping and serialized unchanged, so templates can
/// reach any field. The accessors cover both the older `appinfo.json`
/// layout and the newer `package.json` layout with a `pebble` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppInfo(Map<String, Value>);

impl AppInfo {
    /// Wrap an already parsed mapping.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Display name of the application.
    pub fn name(&self) -> Option<&str> {
        ["shortName", "name", "longName"]
            .iter()
            .find_map(|key| self.str_field(key))
    }

    /// Version string of the application.
    pub fn version(&self) -> Option<&str> {
        ["versionLabel", "version"]
            .iter()
            .find_map(|key| self.str_field(key))
    }

    /// Capabilities requested by the application.
    pub fn capabilities(&self) -> Vec<&str> {
        self.0
            .get("capabilities")
            .or_else(|| self.0.get("pebble").and_then(|p| p.get("capabilities")))
            .and_then(Value::as_array)
            .map(|caps| caps.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl TryFrom<Value> for AppInfo {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(SchemaError::NotAnObject {
                what: "application metadata",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_appinfo_layout() {
        let info = AppInfo::try_from(json!({
            "shortName": "Enamel demo",
            "longName": "Enamel demo application",
            "versionLabel": "1.2",
            "capabilities": ["configurable"]
        }))
        .unwrap();
        assert_eq!(info.name(), Some("Enamel demo"));
        assert_eq!(info.version(), Some("1.2"));
        assert_eq!(info.capabilities(), ["configurable"]);
    }

    #[test]
    fn test_package_json_layout() {
        let info = AppInfo::try_from(json!({
            "name": "enamel-demo",
            "version": "2.0.0",
            "pebble": { "capabilities": ["configurable", "location"] }
        }))
        .unwrap();
        assert_eq!(info.name(), Some("enamel-demo"));
        assert_eq!(info.version(), Some("2.0.0"));
        assert_eq!(info.capabilities(), ["configurable", "location"]);
    }

    #[test]
    fn test_non_object_rejected() {
        let err = AppInfo::try_from(json!(["not", "a", "map"])).unwrap_err();
        assert!(matches!(err, SchemaError::NotAnObject { .. }));
    }
}
