//! Error type for join operations.
//!
//! There is a single failure mode: the injected getter reported an
//! error. Everything else the join operations encounter — missing
//! nested paths, documents without an `_id`, ids with no match — is
//! treated as absence and silently skipped, never as an error.

use std::fmt;

/// Error returned by the join operations.
#[derive(Debug)]
pub enum JoinError {
    /// The injected getter failed. The join operation forwards the
    /// getter's error unchanged, performs no attachment, and never
    /// retries.
    Getter(Box<dyn std::error::Error + Send + Sync>),
}

impl JoinError {
    /// Wrap a getter failure.
    ///
    /// Accepts anything convertible into a boxed error, including plain
    /// strings:
    ///
    /// ```
    /// use docjoin::JoinError;
    ///
    /// let err = JoinError::getter("connection reset");
    /// assert_eq!(err.to_string(), "getter error: connection reset");
    /// ```
    pub fn getter<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        JoinError::Getter(err.into())
    }
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::Getter(e) => {
                write!(f, "getter error: {e}")
            }
        }
    }
}

impl std::error::Error for JoinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JoinError::Getter(e) => Some(e.as_ref()),
        }
    }
}
