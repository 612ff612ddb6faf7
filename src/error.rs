//! Process-level errors.
//!
//! Per-parameter failures are *values* (`domain::ParamError`) and never travel
//! through this module. `AppError` is reserved for caller precondition
//! failures (bad CLI input, unreadable files, malformed records) and carries
//! the exit code the binary should terminate with.

use thiserror::Error;

/// Exit code for bad input, usage errors and IO failures.
pub const EXIT_INPUT: u8 = 2;
/// Exit code when a batch contains no usable rows.
pub const EXIT_EMPTY: u8 = 3;

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Shorthand for the common "bad input" case.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

/// A token that does not name any member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown zone code '{0}'")]
    UnknownZone(String),

    #[error("unknown building nature '{0}'")]
    UnknownNature(String),

    #[error("unknown locale '{0}' (expected `en` or `pt-br`)")]
    UnknownLocale(String),
}

impl From<ParseError> for AppError {
    fn from(value: ParseError) -> Self {
        AppError::input(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::new(3, "No usable rows.");
        assert_eq!(err.to_string(), "No usable rows.");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn parse_errors_become_input_errors() {
        let err: AppError = ParseError::UnknownZone("ZX9".into()).into();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert_eq!(err.to_string(), "unknown zone code 'ZX9'");
    }
}
