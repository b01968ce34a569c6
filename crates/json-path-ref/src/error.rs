//! Error types for path reference mutations.

use thiserror::Error;

/// Failure reported by a [`JsonProvider`](crate::JsonProvider) primitive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("not an array")]
    NotAnArray,
    #[error("not a map")]
    NotAMap,
}

/// Error returned by [`PathRef`](crate::PathRef) operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathRefError {
    /// The mutation is structurally invalid for the referenced location.
    #[error("invalid modification: {0}")]
    InvalidModification(String),
    /// The document provider rejected a primitive read or write.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl PathRefError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PathRefError::InvalidModification(msg.into())
    }

    /// Returns true if this is an [`PathRefError::InvalidModification`].
    pub fn is_invalid_modification(&self) -> bool {
        matches!(self, PathRefError::InvalidModification(_))
    }
}
