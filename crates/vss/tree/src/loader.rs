//! Tree loader
//!
//! A tree is named either by an absolute path to any JSON tree on disk, or by
//! the file name of a catalog bundled into this crate.

use crate::error::{TreeError, TreeResult};
use crate::tree::VssTree;
use std::path::Path;

/// File name of the catalog used when no tree is given.
pub const DEFAULT_TREE: &str = "vss_release_2.0.json";

/// Catalogs compiled into the crate: file name → JSON text.
const BUNDLED: &[(&str, &str)] = &[(
    DEFAULT_TREE,
    include_str!("../data/vss_release_2.0.json"),
)];

/// Names of the bundled catalogs.
pub fn bundled_trees() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|(name, _)| *name)
}

/// Load a tree by bundled name or absolute path.
///
/// # Errors
///
/// - [`TreeError::NotFound`] if the file cannot be read or no bundled tree
///   has that name
/// - [`TreeError::Malformed`] if the JSON cannot be decoded
/// - [`TreeError::NotAnObject`] if the top-level value is not an object
pub fn load_tree(name: &str) -> TreeResult<VssTree> {
    let path = Path::new(name);
    if path.is_absolute() {
        return load_tree_file(path);
    }

    let text = BUNDLED
        .iter()
        .find(|(bundled, _)| *bundled == name)
        .map(|(_, text)| *text)
        .ok_or_else(|| TreeError::NotFound {
            name: name.to_string(),
            source: None,
        })?;

    tracing::debug!(tree = name, "Loading bundled VSS tree");
    VssTree::from_json(text)
}

/// Load the default bundled catalog.
pub fn load_default_tree() -> TreeResult<VssTree> {
    load_tree(DEFAULT_TREE)
}

/// Load a tree from a file on disk (relative paths are allowed here).
pub fn load_tree_file(path: &Path) -> TreeResult<VssTree> {
    let text = std::fs::read_to_string(path).map_err(|e| TreeError::NotFound {
        name: path.display().to_string(),
        source: Some(e),
    })?;

    let tree = VssTree::from_json(&text)?;
    tracing::info!(
        path = %path.display(),
        domains = tree.as_map().len(),
        "Loaded VSS tree"
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_tree() {
        let tree = load_tree(DEFAULT_TREE).unwrap();
        let vehicle = tree.get("Vehicle").unwrap();
        assert_eq!(vehicle["type"], "branch");
        assert!(vehicle["children"]["AverageSpeed"].is_object());
        assert_eq!(load_default_tree().unwrap(), tree);
    }

    #[test]
    fn test_bundled_names() {
        assert_eq!(bundled_trees().collect::<Vec<_>>(), vec![DEFAULT_TREE]);
    }

    #[test]
    fn test_unknown_bundled_name() {
        let err = load_tree("vss_release_9.9.json").unwrap_err();
        match err {
            TreeError::NotFound { name, source } => {
                assert_eq!(name, "vss_release_9.9.json");
                assert!(source.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_absolute_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Vehicle": {{"children": {{}}, "type": "branch"}}}}"#).unwrap();

        let path = file.path().to_str().unwrap();
        let tree = load_tree(path).unwrap();
        assert!(tree.get("Vehicle").is_some());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_tree(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TreeError::NotFound { source: Some(_), .. }));
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"Vehicle\": ").unwrap();
        let err = load_tree_file(file.path()).unwrap_err();
        assert!(matches!(err, TreeError::Malformed(_)));
    }

    #[test]
    fn test_non_object_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[\"Vehicle\"]").unwrap();
        let err = load_tree_file(file.path()).unwrap_err();
        assert!(matches!(err, TreeError::NotAnObject("array")));
    }
}
