//! Error types for the fixture-factory crate.
//!
//! This module defines semantic error enums for fixture building, the
//! name-keyed factory registry and settings loading, following the project's
//! error handling conventions with `thiserror`.

use thiserror::Error;

/// Errors that can occur while building a fixture.
///
/// Every variant indicates a bug in a factory definition or in the overrides
/// supplied by the caller. None of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A dotted attribute key tried to traverse through a value that is not
    /// an object.
    #[error("cannot assign '{key}': segment '{segment}' holds {found}, not an object")]
    InvalidPath {
        /// The full attribute key being assigned.
        key: String,
        /// The intermediate segment that holds a non-object value.
        segment: String,
        /// Description of the value found at `segment`.
        found: &'static str,
    },

    /// The built fixture could not be converted into the requested type.
    #[error("fixture does not match the requested output type: {message}")]
    Conversion {
        /// Description of the conversion failure.
        message: String,
    },

    /// A fallible deferred attribute reported a failure.
    #[error("attribute '{key}' could not be resolved: {message}")]
    Attribute {
        /// Attribute key reported by the deferred function.
        key: String,
        /// Description of the failure.
        message: String,
    },
}

impl BuildError {
    /// Creates a [`BuildError::Attribute`] for use inside fallible deferred
    /// attributes.
    ///
    /// # Example
    ///
    /// ```
    /// use fixture_factory::BuildError;
    ///
    /// let err = BuildError::attribute("email", "name is missing");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "attribute 'email' could not be resolved: name is missing"
    /// );
    /// ```
    #[must_use]
    pub fn attribute(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Attribute {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by the name-keyed [`FactoryRegistry`](crate::FactoryRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No factory was registered under the requested name.
    #[error("factory '{name}' does not exist; did you forget to register it?")]
    UnknownFactory {
        /// The name that was requested.
        name: String,
    },

    /// The registered factory failed to build.
    #[error("factory build failed: {0}")]
    Build(#[from] BuildError),
}

/// Errors raised while loading [`FactorySettings`](crate::FactorySettings).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Configuration layers could not be merged or parsed.
    #[error("failed to load fixture factory settings: {message}")]
    Load {
        /// Description of the underlying configuration error.
        message: String,
    },
}
