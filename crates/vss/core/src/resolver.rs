//! Tree resolver
//!
//! Resolution walks the namespace strictly left to right: the first segment
//! picks a domain, each further segment picks a child, and branches that
//! declare instances consume one segment per instance axis first. When the
//! namespace runs out the current node must be a leaf, which is then
//! validated into a [`Signal`].

use crate::error::{VssError, VssResult};
use crate::instances::InstanceSpec;
use crate::namespace::{IntoNamespace, Namespace};
use crate::node::Node;
use crate::signal::Signal;
use serde_json::{Map, Value};
use vss_tree::{value_kind, VssTree};
use vss_units::{UnitParser, UnitRegistry};

/// Resolves signal names against one tree with one unit parser.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    root: &'a Map<String, Value>,
    units: &'a dyn UnitParser,
}

impl<'a> Resolver<'a> {
    pub fn new(tree: &'a VssTree, units: &'a dyn UnitParser) -> Self {
        Self {
            root: tree.as_map(),
            units,
        }
    }

    /// A resolver over a raw top-level mapping.
    pub fn from_map(root: &'a Map<String, Value>, units: &'a dyn UnitParser) -> Self {
        Self { root, units }
    }

    /// Resolver over the bundled catalog with the process-wide unit registry.
    pub fn bundled() -> VssResult<Resolver<'static>> {
        let tree = VssTree::default_tree()?;
        Ok(Resolver::new(tree, UnitRegistry::global()))
    }

    /// Resolve a dotted name or a sequence of segments.
    pub fn resolve(&self, name: impl IntoNamespace) -> VssResult<Signal> {
        let namespace = name.into_namespace()?;
        self.resolve_namespace(&namespace)
    }

    pub fn resolve_namespace(&self, namespace: &Namespace) -> VssResult<Signal> {
        tracing::debug!(namespace = %namespace, "Resolving signal");

        let result = self.resolve_inner(namespace);
        if let Err(e) = &result {
            tracing::debug!(namespace = %namespace, kind = %e.kind(), error = %e, "Signal resolution failed");
        }
        result
    }

    fn resolve_inner(&self, namespace: &Namespace) -> VssResult<Signal> {
        let domain = namespace.domain();
        let node = self
            .root
            .get(domain)
            .ok_or_else(|| VssError::branch(format!("no such domain '{}'", domain)))?;
        self.descend(node, namespace, 1)
    }

    fn descend(&self, value: &Value, namespace: &Namespace, idx: usize) -> VssResult<Signal> {
        let node = Node::classify(value, &namespace.prefix(idx))?;
        tracing::trace!(path = %namespace.prefix(idx), leaf = node.is_leaf(), "Descending");

        let mut idx = idx;
        if let Some(raw) = node.instances() {
            let found = namespace.prefix(idx);
            idx = InstanceSpec::parse(raw, &found)?.consume(namespace, idx)?;
        }

        if idx == namespace.len() {
            return match node {
                Node::Leaf { fields, .. } => {
                    let found = namespace.prefix(idx);
                    Signal::from_fields(namespace.segments().to_vec(), fields, self.units).map_err(
                        |e| VssError::spec_with(format!("malformed sensor specification for '{}'", found), e),
                    )
                }
                Node::Branch { .. } => Err(VssError::branch(format!(
                    "node '{}' is a branch, not a signal",
                    namespace.prefix(idx)
                ))),
            };
        }

        let children = match node {
            Node::Branch {
                children: Some(children),
                ..
            } => children,
            _ => {
                return Err(VssError::branch(format!(
                    "attempted to follow branch '{}' from leaf node '{}'",
                    namespace.suffix(idx),
                    namespace.prefix(idx)
                )))
            }
        };

        let segment = &namespace.segments()[idx];
        let child = children.get(segment).ok_or_else(|| {
            VssError::branch(format!(
                "branch '{}' has no such child '{}'",
                namespace.prefix(idx),
                segment
            ))
        })?;
        self.descend(child, namespace, idx + 1)
    }
}

/// Look up a signal in the bundled catalog.
///
/// ```rust
/// let signal = vss::find_signal("Vehicle.AverageSpeed").unwrap();
/// assert_eq!(signal.unit(), "km/h");
/// ```
pub fn find_signal(name: impl IntoNamespace) -> VssResult<Signal> {
    let namespace = name.into_namespace()?;
    Resolver::bundled()?.resolve_namespace(&namespace)
}

/// Resolve with dynamically typed arguments, checking their kinds before
/// touching the tree. Uses the process-wide unit registry when `units` is
/// `None`.
pub fn resolve_value(name: &Value, tree: &Value, units: Option<&dyn UnitParser>) -> VssResult<Signal> {
    let namespace = match name {
        Value::String(s) => Namespace::parse(s)?,
        Value::Array(items) => {
            let mut segments = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => segments.push(s.clone()),
                    other => {
                        return Err(VssError::argument(format!(
                            "name must be a string or an array of strings, got array containing {}",
                            value_kind(other)
                        )))
                    }
                }
            }
            Namespace::try_from(segments)?
        }
        other => {
            return Err(VssError::argument(format!(
                "name must be a string or an array of strings, got {}",
                value_kind(other)
            )))
        }
    };

    let Value::Object(root) = tree else {
        return Err(VssError::argument(format!(
            "tree must be an object, got {}",
            value_kind(tree)
        )));
    };

    let units: &dyn UnitParser = match units {
        Some(units) => units,
        None => UnitRegistry::global(),
    };
    Resolver::from_map(root, units).resolve_namespace(&namespace)
}
