//! Error types for the linked hash tree.
//!
//! - [`Error`]: returned by container operations that cannot proceed, i.e.
//!   min/max on an empty container or a mutation on a read-only one. A key
//!   that simply isn't present is never an error; lookups return `Option`.
//! - [`ConfigError`]: returned when construction parameters are invalid.
//! - [`InvariantError`]: returned by `check_invariants` when the three views
//!   over the entries have drifted apart.

use std::fmt;

/// Failure of a container operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A minimum or maximum was requested from an empty container.
    Empty,

    /// A mutating call was made on a container that is not modifiable.
    ReadOnly,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => f.write_str("container is empty"),
            Error::ReadOnly => f.write_str("container is read-only"),
        }
    }
}

impl std::error::Error for Error {}

/// Error returned when construction parameters are invalid. Carries a
/// human-readable description of which parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Error returned when the container's internal invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
