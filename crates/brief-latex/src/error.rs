//! Error types for compiler settings

use thiserror::Error;

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while loading compiler settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("Failed to read settings {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for this schema
    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}
