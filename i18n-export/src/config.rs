//! The host configuration document shared by every plugin.
//!
//! A [`ConfigDocument`] is an untyped tree: each plugin owns one root key and
//! validates its own namespace before reading it into typed settings.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Error;

/// Host-owned configuration, borrowed read-only by plugin hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Wraps an already parsed value. The root must be a mapping.
    pub fn from_value(root: Value) -> Result<Self, Error> {
        match root {
            Value::Object(root) => Ok(ConfigDocument { root }),
            _ => Err(Error::Config(
                "the configuration root must be a mapping".to_string(),
            )),
        }
    }

    /// Parses a YAML document. JSON is valid YAML, so this accepts both.
    pub fn from_yaml_str(s: &str) -> Result<Self, Error> {
        let root: Value = serde_yaml::from_str(s)
            .map_err(|e| Error::Config(format!("invalid YAML: {}", e)))?;
        match root {
            // Empty and comment-only documents parse as null.
            Value::Null => Ok(ConfigDocument { root: Map::new() }),
            root => Self::from_value(root),
        }
    }

    /// Parses a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let root: Value =
            serde_json::from_str(s).map_err(|e| Error::Config(format!("invalid JSON: {}", e)))?;
        Self::from_value(root)
    }

    /// Loads a configuration file, picking the parser from its extension.
    /// `.json` files are parsed as JSON, anything else as YAML.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// The root mapping.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Whether a root key is present at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.root().contains_key(key)
    }

    /// Returns the value under a root key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root().get(key)
    }

    /// Walks nested mappings along `path`, returning `None` as soon as a
    /// segment is missing or a non-mapping is reached. An empty path has no
    /// value.
    pub fn dig(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.root.get(*first)?, |node, segment| {
                node.as_object()?.get(*segment)
            })
    }
}
