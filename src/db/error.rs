//! Errors raised while reading or writing saved scores.

use derive_more::{Display, Error};
use tracing::instrument;

/// A score could not be read from or written to its store.
///
/// Carries the source location that raised it, so a failed save shown in the
/// status line can be traced back to the backend call.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store failed: {} ({}:{})", message, file, line)]
pub struct StoreError {
    /// What went wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl StoreError {
    /// Wraps `message`, recording the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("score query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("could not open score database: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_store_and_caller() {
        let err = StoreError::new("disk full");
        assert_eq!(err.file, file!());
        assert_eq!(
            err.to_string(),
            format!("Score store failed: disk full ({}:{})", file!(), err.line)
        );
    }

    #[test]
    fn test_diesel_errors_convert() {
        let err = StoreError::from(diesel::result::Error::NotFound);
        assert!(err.message.starts_with("score query failed"));
    }
}
