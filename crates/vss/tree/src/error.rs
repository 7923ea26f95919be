//! Tree loading error types

use thiserror::Error;

/// Errors that can occur while loading a specification tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The tree file could not be opened, or no bundled tree has that name.
    #[error("failed to open VSS tree from {name}")]
    NotFound {
        name: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The tree source is not valid JSON.
    #[error("invalid VSS tree JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("VSS tree must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_keeps_io_source() {
        let e = TreeError::NotFound {
            name: "/missing.json".into(),
            source: Some(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        };
        assert_eq!(e.to_string(), "failed to open VSS tree from /missing.json");
        assert!(e.source().is_some());
    }

    #[test]
    fn test_malformed_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: TreeError = err.into();
        assert!(e.to_string().starts_with("invalid VSS tree JSON"));
    }

    #[test]
    fn test_not_an_object_names_kind() {
        assert_eq!(
            TreeError::NotAnObject("array").to_string(),
            "VSS tree must be a JSON object, got array"
        );
    }
}
