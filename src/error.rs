//! Error taxonomy for the shortcut engine.
//!
//! Nothing here is fatal to the host: load-time errors are isolated per file,
//! resolution errors abort a single shortcut, and stale host state is dropped
//! by the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the configuration store and the shortcut engine.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// A technology file could not be read.
    #[error("failed to read technology config {}: {source}", path.display())]
    ConfigIo {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A technology file is not valid JSON or does not match the schema.
    #[error("failed to parse technology config {}: {source}", path.display())]
    ConfigParse {
        /// File that failed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A technology config could not be serialized.
    #[error("failed to serialize technology config '{technology}': {source}")]
    ConfigSerialize {
        /// Technology being written
        technology: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// No configuration is registered for the technology.
    #[error("no layer shortcut configuration found for technology '{0}'")]
    UnknownTechnology(String),

    /// A descriptor references a layer group that is not defined.
    #[error("unknown layer group '{name}'")]
    UnknownGroup {
        /// The dangling group name
        name: String,
    },

    /// Two shortcuts of one technology share a key.
    #[error("shortcut key '{key}' is defined multiple times ({})", titles.join(", "))]
    DuplicateKeyInConfig {
        /// The duplicated key
        key: String,
        /// Titles of every shortcut using the key
        titles: Vec<String>,
    },

    /// A deferred operation's target no longer exists in the host.
    #[error("host state changed before the operation ran: {0}")]
    HostStateStale(String),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ShortcutError>;

impl ShortcutError {
    /// Builds an `UnknownGroup` error.
    pub fn unknown_group(name: impl Into<String>) -> Self {
        Self::UnknownGroup { name: name.into() }
    }

    /// Whether the caller should drop the error silently.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::HostStateStale(_))
    }
}
