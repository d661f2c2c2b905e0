//! Error types for Tarpon
//!
//! All modules use `TarponResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Tarpon operations
pub type TarponResult<T> = Result<T, TarponError>;

/// All errors that can occur in Tarpon
#[derive(Error, Debug)]
pub enum TarponError {
    // Registry errors
    #[error("Network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Registry rejected {name}: {message}")]
    Registry { name: String, message: String },

    #[error("Invalid metadata for {name}: {reason}")]
    Parse { name: String, reason: String },

    // Download errors
    #[error("No tarball available for {0}")]
    MissingArtifact(String),

    #[error("A download batch is already in progress")]
    DownloadInProgress,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl TarponError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a network error for a failed transport to `url`
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a registry rejection error for `name`
    pub fn registry(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registry {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a metadata parse error for `name`
    pub fn parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came out of a single package lookup.
    ///
    /// Traversals treat these as "this package has no dependencies" and
    /// keep going; anything else is a caller bug or environment problem.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Registry { .. } | Self::Parse { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Network { .. } => Some("Check your connection and the registry URL"),
            Self::DownloadInProgress => Some("Wait for the current batch to finish"),
            Self::ConfigInvalid { .. } => Some("Fix or delete the config file and retry"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TarponError::registry("left-pad", "not found");
        assert!(err.to_string().contains("left-pad"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn error_hint() {
        let err = TarponError::network("https://registry.invalid", "dns failure");
        assert_eq!(
            err.hint(),
            Some("Check your connection and the registry URL")
        );
    }

    #[test]
    fn lookup_failures() {
        assert!(TarponError::network("u", "r").is_lookup_failure());
        assert!(TarponError::registry("n", "m").is_lookup_failure());
        assert!(TarponError::parse("n", "r").is_lookup_failure());
        assert!(!TarponError::MissingArtifact("n".into()).is_lookup_failure());
        assert!(!TarponError::DownloadInProgress.is_lookup_failure());
    }
}
