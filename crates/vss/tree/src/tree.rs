//! In-memory specification tree
//!
//! A [`VssTree`] is the decoded JSON object whose keys are the top-level
//! domains (`Vehicle`, ...). It is read-only once built: every accessor hands
//! out shared references.

use crate::error::{TreeError, TreeResult};
use crate::loader::{load_tree, DEFAULT_TREE};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::OnceLock;

/// A decoded specification tree: domain name → root node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VssTree {
    root: Map<String, Value>,
}

impl VssTree {
    /// Wrap an already decoded JSON value, which must be an object.
    pub fn from_value(value: Value) -> TreeResult<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(TreeError::NotAnObject(value_kind(&other))),
        }
    }

    /// Decode a tree from JSON text.
    pub fn from_json(text: &str) -> TreeResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// The bundled default catalog, decoded once per process.
    pub fn default_tree() -> TreeResult<&'static VssTree> {
        static TREE: OnceLock<VssTree> = OnceLock::new();
        if let Some(tree) = TREE.get() {
            return Ok(tree);
        }
        let tree = load_tree(DEFAULT_TREE)?;
        Ok(TREE.get_or_init(|| tree))
    }

    /// Root node of a domain.
    pub fn get(&self, domain: &str) -> Option<&Value> {
        self.root.get(domain)
    }

    /// Top-level domain names.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// The underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Consume the tree, returning the JSON object it wraps.
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

impl FromStr for VssTree {
    type Err = TreeError;

    fn from_str(s: &str) -> TreeResult<Self> {
        Self::from_json(s)
    }
}

impl TryFrom<Value> for VssTree {
    type Error = TreeError;

    fn try_from(value: Value) -> TreeResult<Self> {
        Self::from_value(value)
    }
}

impl<'de> Deserialize<'de> for VssTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Name of a JSON value's kind, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
