//! Key-value map payloads

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::environment::Property;

/// Body for creating an environment-scoped key-value map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueMapSpec {
    pub name: String,
    pub encrypted: bool,
    #[serde(default)]
    pub entry: Vec<Property>,
}

impl KeyValueMapSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, entries: &BTreeMap<String, String>, encrypted: bool) -> Self {
        let entry = entries
            .iter()
            .map(|(name, value)| Property { name: name.clone(), value: value.clone() })
            .collect();
        Self { name: name.into(), encrypted, entry }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn entries_become_name_value_pairs() {
        let mut entries = BTreeMap::new();
        entries.insert("endpoint".to_string(), "https://backend.acme.test".to_string());

        let spec = KeyValueMapSpec::new("settings", &entries, true);

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "name": "settings",
                "encrypted": true,
                "entry": [{"name": "endpoint", "value": "https://backend.acme.test"}]
            })
        );
    }
}
