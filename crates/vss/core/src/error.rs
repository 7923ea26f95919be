//! Resolution error types
//!
//! Every failure belongs to exactly one [`ErrorKind`]:
//!
//! - **Argument**: the caller passed a name or tree of the wrong shape
//! - **Branch**: the requested path does not exist in the tree
//! - **Spec**: the tree itself is malformed along the requested path
//! - **Resource**: the tree could not be opened

use crate::datatype::Datatype;
use std::fmt;
use thiserror::Error;
use vss_tree::TreeError;
use vss_units::UnitError;

/// Boxed cause attached to a specification failure.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by signal resolution.
#[derive(Debug, Error)]
pub enum VssError {
    /// The name or tree argument is unusable.
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested path does not exist.
    #[error("{0}")]
    Branch(String),

    /// The specification tree is malformed.
    #[error("{message}")]
    Spec {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The specification tree could not be opened.
    #[error(transparent)]
    Resource(TreeError),
}

/// The four disjoint failure families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Argument,
    Branch,
    Spec,
    Resource,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Argument => "argument",
            ErrorKind::Branch => "branch",
            ErrorKind::Spec => "spec",
            ErrorKind::Resource => "resource",
        };
        f.write_str(name)
    }
}

impl VssError {
    pub fn argument(message: impl Into<String>) -> Self {
        VssError::InvalidArgument(message.into())
    }

    pub fn branch(message: impl Into<String>) -> Self {
        VssError::Branch(message.into())
    }

    pub fn spec(message: impl Into<String>) -> Self {
        VssError::Spec {
            message: message.into(),
            source: None,
        }
    }

    /// A specification failure caused by a lower-level error.
    pub fn spec_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        VssError::Spec {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Which failure family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VssError::InvalidArgument(_) => ErrorKind::Argument,
            VssError::Branch(_) => ErrorKind::Branch,
            VssError::Spec { .. } => ErrorKind::Spec,
            VssError::Resource(_) => ErrorKind::Resource,
        }
    }
}

impl From<TreeError> for VssError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::NotFound { .. } => VssError::Resource(err),
            other => VssError::spec_with("malformed VSS tree", other),
        }
    }
}

impl From<NamespaceError> for VssError {
    fn from(err: NamespaceError) -> Self {
        VssError::InvalidArgument(err.to_string())
    }
}

/// Result type for resolution
pub type VssResult<T> = Result<T, VssError>;

/// A namespace that is empty or has an empty segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NamespaceError {
    #[error("namespace must contain at least one key")]
    Empty,

    #[error("namespace cannot contain an empty key")]
    EmptyKey,
}

/// Field-level failures while building a [`Signal`](crate::Signal).
///
/// Variants follow the order of the construction checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// Missing, unknown or wrongly typed leaf fields.
    #[error("invalid signal fields: {0}")]
    Decode(String),

    #[error("unrecognized datatype '{0}'")]
    UnknownDatatype(String),

    #[error("enum provided for non-string datatype {0}")]
    EnumOnNonString(Datatype),

    #[error("min {min} is greater than max {max} for datatype {datatype}")]
    InvertedBounds {
        min: String,
        max: String,
        datatype: Datatype,
    },

    #[error("default value of type {kind} does not match datatype {datatype}")]
    DefaultTypeMismatch {
        kind: &'static str,
        datatype: Datatype,
    },

    #[error("default value {value} is out of range for datatype {datatype}")]
    DefaultOutOfRange { value: String, datatype: Datatype },

    #[error("illegal unit '{unit}'")]
    IllegalUnit {
        unit: String,
        #[source]
        source: UnitError,
    },

    #[error("datatype {datatype} requires a dimensionless unit, got '{unit}'")]
    IncompatibleUnit { datatype: Datatype, unit: String },

    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error("cannot clamp a value for non-numeric datatype {0}")]
    NotNumeric(Datatype),

    #[error("cannot clamp NaN")]
    NotANumber,
}

/// Result type for signal construction
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors raised while loading or applying a [`VssConfig`](crate::VssConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid unit configuration: {0}")]
    Units(#[from] UnitError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kinds() {
        assert_eq!(VssError::argument("x").kind(), ErrorKind::Argument);
        assert_eq!(VssError::branch("x").kind(), ErrorKind::Branch);
        assert_eq!(VssError::spec("x").kind(), ErrorKind::Spec);
        assert_eq!(ErrorKind::Resource.to_string(), "resource");
    }

    #[test]
    fn test_tree_error_mapping() {
        let missing = TreeError::NotFound {
            name: "nope.json".into(),
            source: None,
        };
        let err = VssError::from(missing);
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert_eq!(err.to_string(), "failed to open VSS tree from nope.json");

        let err = VssError::from(TreeError::NotAnObject("array"));
        assert_eq!(err.kind(), ErrorKind::Spec);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_namespace_error_is_argument() {
        let err = VssError::from(NamespaceError::EmptyKey);
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert_eq!(err.to_string(), "namespace cannot contain an empty key");
    }

    #[test]
    fn test_spec_with_keeps_source() {
        let err = VssError::spec_with(
            "malformed sensor specification for 'Vehicle.Speed'",
            SignalError::UnknownDatatype("int128".into()),
        );
        assert_eq!(
            err.to_string(),
            "malformed sensor specification for 'Vehicle.Speed'"
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "unrecognized datatype 'int128'");
    }
}
