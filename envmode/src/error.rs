//! Error types for environment variable configuration

use std::path::PathBuf;

use crate::populate::{FieldDescriptor, TargetKind};

/// A raw string that could not be converted into its target kind.
///
/// Shared by the accessor chain and the struct populator so both report
/// the same diagnostic for the same input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value '{value}': {message}")]
pub struct CoerceError {
    /// Kind the value was coerced into
    pub kind: TargetKind,
    /// Offending raw value
    pub value: String,
    /// Message from the underlying parser
    pub message: String,
}

impl CoerceError {
    pub fn new(kind: TargetKind, value: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self {
            kind,
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Wrap the error of a user supplied deserializer function
    #[doc(hidden)]
    pub fn custom(value: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::new(TargetKind::Custom, value, message)
    }
}

/// Failures reported by strict terminals of a [`LookupResult`](crate::LookupResult).
///
/// Carried failures are replayed verbatim, so this type is cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// `required()` was called on a key with no value.
    #[error("environment variable '{key}' is required but not set")]
    Required {
        /// Fully qualified (prefixed) key
        key: String,
    },

    /// A typed terminal found no value to coerce.
    #[error("environment variable '{key}' not found")]
    NotFound {
        /// Fully qualified (prefixed) key
        key: String,
    },

    /// The value was present but malformed.
    #[error("failed to parse environment variable '{key}': {source}")]
    Parse {
        /// Fully qualified (prefixed) key
        key: String,
        /// Underlying coercion failure
        source: CoerceError,
    },
}

/// Errors raised while building a [`Config`](crate::Config) or populating a struct.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `APP_ENV` or a caller supplied mode names no known mode.
    #[error("invalid environment mode '{0}'")]
    InvalidMode(String),

    /// The production overlay file does not exist.
    #[error("environment file '{}' not found", path.display())]
    MissingOverlay {
        /// Expected location of the overlay file
        path: PathBuf,
    },

    /// The overlay file exists but could not be read or parsed.
    #[error("failed to load environment file '{}': {source}", path.display())]
    Overlay {
        /// Overlay file that failed to load
        path: PathBuf,
        /// Error reported by the dotenv parser
        source: dotenvy::Error,
    },

    /// A field value could not be coerced into the field's type.
    #[error("failed to set field {field} ({type_name}): {source}")]
    Field {
        /// Field identifier as declared
        field: &'static str,
        /// Declared type of the field
        type_name: &'static str,
        /// Underlying coercion failure
        source: CoerceError,
    },

    /// The field's declared type has no coercion.
    #[error("failed to set field {field}: unsupported type {type_name}")]
    Unsupported {
        /// Field identifier as declared
        field: &'static str,
        /// Declared type of the field
        type_name: &'static str,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Error {
    /// Create a field coercion error (used by macro-generated code)
    #[doc(hidden)]
    pub fn field(descriptor: &FieldDescriptor, source: CoerceError) -> Self {
        Self::Field {
            field: descriptor.name,
            type_name: descriptor.type_name,
            source,
        }
    }

    /// Create an unsupported field type error (used by macro-generated code)
    #[doc(hidden)]
    pub fn unsupported(descriptor: &FieldDescriptor) -> Self {
        Self::Unsupported {
            field: descriptor.name,
            type_name: descriptor.type_name,
        }
    }
}
