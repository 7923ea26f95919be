//! CLI error types

use thiserror::Error;
use vss::{ConfigError, ErrorKind, SignalError, VssError};

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Resolve(#[from] VssError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid value '{0}': expected a number")]
    InvalidValue(String),

    #[error(transparent)]
    Clamp(#[from] SignalError),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code: 1 when the request was wrong, 2 when the tree or
    /// environment is.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Resolve(e) => match e.kind() {
                ErrorKind::Argument | ErrorKind::Branch => 1,
                ErrorKind::Spec | ErrorKind::Resource => 2,
            },
            CliError::InvalidValue(_) | CliError::Clamp(_) => 1,
            CliError::Config(_) | CliError::Output(_) => 2,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::from(VssError::branch("x")).exit_code(), 1);
        assert_eq!(CliError::from(VssError::argument("x")).exit_code(), 1);
        assert_eq!(CliError::from(VssError::spec("x")).exit_code(), 2);
        assert_eq!(CliError::InvalidValue("fast".into()).exit_code(), 1);
        assert_eq!(CliError::from(SignalError::NotANumber).exit_code(), 1);
    }
}
