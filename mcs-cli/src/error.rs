//! CLI-specific error type.
//!
//! Every error that reaches `main` is printed to stderr and ends the process
//! with exit code 1.

use std::fmt;

use mcs::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// I/O error.
    Io(std::io::Error),

    /// A requested configuration key does not exist.
    MissingKey(String),

    /// Command-line arguments could not be parsed.
    InvalidArguments(String),
}

impl CliError {
    /// Get the exit code for this error.
    ///
    /// All failures map to 1, argument parsing errors included.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(_)
            | CliError::Io(_)
            | CliError::MissingKey(_)
            | CliError::InvalidArguments(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::MissingKey(key) => write!(f, "Configuration key not set: {key}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<clap::Error> for CliError {
    fn from(e: clap::Error) -> Self {
        CliError::InvalidArguments(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_error_exits_with_one() {
        let err = CliError::from(LibError::Startup {
            reason: "unavailable".into(),
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "cannot determine executable location: unavailable"
        );
    }

    #[test]
    fn test_missing_key_message() {
        let err = CliError::MissingKey("speed".into());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Configuration key not set: speed");
    }

    #[test]
    fn test_argument_error_exits_with_one() {
        let err = CliError::from(clap::Error::new(clap::error::ErrorKind::UnknownArgument));
        assert!(matches!(err, CliError::InvalidArguments(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
