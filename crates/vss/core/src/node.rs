//! Tree node classification
//!
//! Raw nodes carry no explicit discriminator: a node is a leaf when its `type`
//! is anything other than `branch`, and a branch otherwise (including when
//! `type` is missing).

use crate::error::{VssError, VssResult};
use serde_json::{Map, Value};
use vss_tree::value_kind;

/// A classified view over a raw tree node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'t> {
    Branch {
        children: Option<&'t Map<String, Value>>,
        instances: Option<&'t Value>,
    },
    Leaf {
        fields: &'t Map<String, Value>,
        instances: Option<&'t Value>,
    },
}

impl<'t> Node<'t> {
    /// Classify the node found at `path`.
    pub fn classify(value: &'t Value, path: &str) -> VssResult<Self> {
        let Value::Object(fields) = value else {
            return Err(VssError::spec(format!(
                "node '{}' must be an object, got {}",
                path,
                value_kind(value)
            )));
        };
        let instances = fields.get("instances");

        let is_branch = match fields.get("type") {
            None => true,
            Some(Value::String(t)) => t == "branch",
            Some(other) => {
                return Err(VssError::spec(format!(
                    "node '{}' has a type of kind {}, expected a string",
                    path,
                    value_kind(other)
                )))
            }
        };
        if !is_branch {
            return Ok(Node::Leaf { fields, instances });
        }

        let children = match fields.get("children") {
            None => None,
            Some(Value::Object(children)) => Some(children),
            Some(other) => {
                return Err(VssError::spec(format!(
                    "children of '{}' must be an object, got {}",
                    path,
                    value_kind(other)
                )))
            }
        };
        Ok(Node::Branch {
            children,
            instances,
        })
    }

    pub fn instances(&self) -> Option<&'t Value> {
        match *self {
            Node::Branch { instances, .. } | Node::Leaf { instances, .. } => instances,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}
