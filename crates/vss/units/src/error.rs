//! Unit error types

use thiserror::Error;

/// Errors raised while parsing unit expressions or extending a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// No unit, prefixed unit, or alias with this name.
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    /// The expression is not well formed.
    #[error("invalid unit expression '{expr}': {message}")]
    Syntax { expr: String, message: String },

    /// A symbol, name, or alias is already taken.
    #[error("unit '{0}' is already defined")]
    DuplicateDefinition(String),
}

/// Result type for unit operations
pub type UnitResult<T> = Result<T, UnitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = UnitError::UnknownUnit("furlong".into());
        assert_eq!(e.to_string(), "unknown unit 'furlong'");

        let e = UnitError::Syntax {
            expr: "m/".into(),
            message: "unexpected end of expression".into(),
        };
        assert!(e.to_string().contains("'m/'"));
    }
}
