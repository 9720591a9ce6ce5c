//! Error types for the calculation engine.

use thiserror::Error;

use crate::models::Scope;

/// The catalog resource could not be loaded. Fatal: no calculation may
/// proceed against a missing or partial catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource could not be read from the host.
    #[error("catalog resource unreadable at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource was read but is not a valid catalog document.
    #[error("catalog resource is not a valid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A (scope, category, source) triple did not resolve to a factor record.
/// Local to one entry; other entries proceed.
///
/// `Display`/`Error` are hand-written rather than derived via `thiserror`
/// because the `UnknownSource` variant carries a data field literally named
/// `source`, which `thiserror` would otherwise treat as the error's
/// underlying cause (requiring `String: std::error::Error`). These are leaf
/// errors with no underlying cause, so `Error::source` returns `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No such category under the given scope.
    UnknownCategory { scope: Scope, category: String },

    /// No such source under the given scope and category.
    UnknownSource {
        scope: Scope,
        category: String,
        source: String,
    },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::UnknownCategory { scope, category } => {
                write!(f, "unknown category '{category}' under {scope}")
            }
            LookupError::UnknownSource {
                scope,
                category,
                source,
            } => write!(f, "unknown source '{source}' under {scope}/{category}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// History persistence failed. The in-memory calculation remains valid and
/// exportable; callers surface this instead of discarding results.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing storage could not be read or written.
    #[error("history storage failed for key '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored document exists but is not a valid record list.
    #[error("stored history for key '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The record list could not be encoded for storage.
    #[error("history records could not be encoded: {0}")]
    Encode(serde_json::Error),
}
