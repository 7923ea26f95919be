//! Vehicle Signal Specification trees
//!
//! Loads a VSS tree (the JSON export of the signal catalog) either from the
//! catalog bundled into this crate or from an absolute path, and wraps it in
//! a read-only [`VssTree`].
//!
//! # Example
//!
//! ```rust
//! use vss_tree::{load_tree, DEFAULT_TREE};
//!
//! let tree = load_tree(DEFAULT_TREE).unwrap();
//! assert!(tree.get("Vehicle").is_some());
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use loader::{bundled_trees, load_default_tree, load_tree, load_tree_file, DEFAULT_TREE};
pub use tree::{value_kind, VssTree};
