//! Error types for metadata construction, lookup, translation and serialization.
//!
//! Absence of metadata is never an error: drivers and factories return `Ok(None)`.
//! Every variant below wraps the underlying failure unmodified so callers can walk
//! the `source()` chain back to the original cause.

use thiserror::Error;

/// Violations detected while assembling a `ClassMetadata`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("relation declared on '{class}' has an empty name")]
    EmptyRelationName { class: String },

    #[error("relation '{name}' is declared more than once on '{class}'")]
    DuplicateRelation { class: String, name: String },
}

/// Failures raised by an annotation reader.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("malformed annotations on '{class}': {reason}")]
    Malformed { class: String, reason: String },
}

/// Failures raised while loading metadata for one class.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Failures raised by the metadata factory.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("metadata cache lock was poisoned")]
    Poisoned,
}

/// Failures raised by a translator.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to read properties of '{class}'")]
    Serialize {
        class: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
}

/// Failures raised by an event subscriber.
#[derive(Debug, Error)]
pub enum HookError {
    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// Failures raised while serializing one object.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("failed to convert '{class}' to JSON")]
    Json {
        class: String,
        #[source]
        source: serde_json::Error,
    },
}
