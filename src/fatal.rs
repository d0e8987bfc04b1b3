//! Fatal errors and process termination.
//!
//! A [`FatalError`] marks a condition the program cannot proceed from:
//! a required directory or file is missing, or a scheduler-provided value
//! is unparseable. Helpers return it as an ordinary `Result` error so they
//! stay testable; the terminal behavior (log, write to stderr, exit
//! non-zero) happens only when the caller invokes [`FatalError::exit`] or
//! [`die`] at the program boundary.

use std::process::exit;

use thiserror::Error;

/// An unrecoverable error carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FatalError {
    message: String,
}

impl FatalError {
    /// Create a fatal error from any message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message that will be logged and written to stderr.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Log the message at error level, write it to stderr, and terminate
    /// the process with exit status 1.
    pub fn exit(&self) -> ! {
        tracing::error!("{}", self.message);
        eprintln!("{}", self.message);
        exit(1);
    }
}

impl From<String> for FatalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for FatalError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Exit the program with the given error message.
///
/// Shorthand for `FatalError::new(message).exit()`.
pub fn die(message: &str) -> ! {
    FatalError::new(message).exit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_verbatim() {
        let err = FatalError::new("Error: /var/spool is not a directory");
        assert_eq!(err.to_string(), "Error: /var/spool is not a directory");
        assert_eq!(err.message(), "Error: /var/spool is not a directory");
    }

    #[test]
    fn test_from_string_and_str() {
        let from_string = FatalError::from(String::from("boom"));
        let from_str = FatalError::from("boom");
        assert_eq!(from_string, from_str);
    }
}
