//! Environment payloads and the name/value property list format

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single `{name, value}` pair as the management API encodes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Wrapper object the API uses around property arrays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyList {
    #[serde(default)]
    pub property: Vec<Property>,
}

impl PropertyList {
    /// Build a list from plain key/value pairs, sorted by key.
    #[must_use]
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        let property = pairs
            .iter()
            .map(|(name, value)| Property { name: name.clone(), value: value.clone() })
            .collect();
        Self { property }
    }
}

/// Body for creating or updating an environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: PropertyList,
}

impl EnvironmentSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: String::new(), properties: PropertyList::default() }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn properties(mut self, props: &BTreeMap<String, String>) -> Self {
        self.properties = PropertyList::from_pairs(props);
        self
    }
}

/// Flatten `[{name, value}, ...]` into a JSON object.
///
/// The strings `"true"` and `"false"` become JSON booleans; every other value
/// is kept as a string. Later duplicates win.
#[must_use]
pub fn objectify(properties: &[Property]) -> Map<String, Value> {
    properties
        .iter()
        .map(|property| {
            let value = match property.value.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => Value::String(other.to_string()),
            };
            (property.name.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn prop(name: &str, value: &str) -> Property {
        Property { name: name.to_string(), value: value.to_string() }
    }

    #[test]
    fn objectify_coerces_boolean_strings_only() {
        let map = objectify(&[
            prop("useSampling", "true"),
            prop("features.isCpsEnabled", "false"),
            prop("samplingRate", "10"),
            prop("label", "True"),
        ]);

        assert_eq!(
            Value::Object(map),
            json!({
                "useSampling": true,
                "features.isCpsEnabled": false,
                "samplingRate": "10",
                "label": "True"
            })
        );
    }

    #[test]
    fn environment_spec_serializes_property_wrapper() {
        let mut props = BTreeMap::new();
        props.insert("b".to_string(), "2".to_string());
        props.insert("a".to_string(), "1".to_string());

        let spec = EnvironmentSpec::new("test").description("qa").properties(&props);

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "name": "test",
                "description": "qa",
                "properties": {"property": [
                    {"name": "a", "value": "1"},
                    {"name": "b", "value": "2"}
                ]}
            })
        );
    }
}
