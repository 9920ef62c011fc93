//! Persisted core configuration.
//!
//! A `Properties` bag carries a core's quirk configuration across save and
//! restore. The round trip through JSON must be lossless for every field —
//! the registry relies on exact equality to match a bag against its presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// An ordered key-value bag, serializable to and from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    values: BTreeMap<String, PropValue>,
}

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), PropValue::Bool(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), PropValue::Int(value));
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), PropValue::Str(value.to_string()));
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(PropValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(PropValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(PropValue::Str(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.values.iter()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_is_lossless() {
        let mut props = Properties::new();
        props.set_bool("wrapSprites", true);
        props.set_int("instructionsPerFrame", 15);
        props.set_str("preset", "xo-chip");

        let json = props.to_json().expect("serialize");
        let back = Properties::from_json(&json).expect("parse");
        assert_eq!(props, back);
    }

    #[test]
    fn typed_getters_reject_mismatched_types() {
        let mut props = Properties::new();
        props.set_int("n", 5);
        assert_eq!(props.get_int("n"), Some(5));
        assert_eq!(props.get_bool("n"), None);
        assert_eq!(props.get_str("n"), None);
    }
}
