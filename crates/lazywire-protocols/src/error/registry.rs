//! Registry-related errors.

use thiserror::Error;

/// Broad classification of a [`RegistryError`].
///
/// Lets callers tell an optional lookup that missed apart from a wiring
/// mistake without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Misuse at registration time (empty or duplicate id).
    InvalidParameter,
    /// The requested id was never registered.
    NotFound,
    /// Something went wrong while producing or reading a value.
    Resolution,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid registry parameter: {0}")]
    InvalidParameter(String),

    #[error("Registry ID not found: '{0}'")]
    IdNotFound(String),

    #[error("Circular resolution detected: '{0}' is already being constructed")]
    CircularResolution(String),

    #[error("Resolution depth exceeded while resolving '{id}' (limit {depth})")]
    ResolutionDepthExceeded { id: String, depth: usize },

    #[error("Type mismatch for '{id}': expected {expected}")]
    TypeMismatch { id: String, expected: &'static str },

    #[error("Factory for '{id}' failed: {source}")]
    FactoryFailed {
        id: String,
        #[source]
        source: Box<RegistryError>,
    },

    #[error("Cursor out of range: position {position}, {len} entries")]
    CursorOutOfRange { position: usize, len: usize },

    #[error("{0}")]
    Custom(String),
}

impl RegistryError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            RegistryError::IdNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Resolution,
        }
    }

    /// True when the requested id does not exist.
    ///
    /// Only the outermost error is inspected; a factory whose own sibling
    /// lookup missed reports `FactoryFailed`, not a missing id.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Build a [`RegistryError::Custom`] from any message.
    pub fn custom(message: impl Into<String>) -> Self {
        RegistryError::Custom(message.into())
    }
}
