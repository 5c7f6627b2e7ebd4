//! Error types.
//!
//! The engine has a single error kind: configuration problems detected
//! when a session is constructed or a theme catalog is loaded. Illegal card
//! selections are not errors; they are ignored by the session.

use thiserror::Error;

/// Configuration error raised synchronously at session construction.
///
/// No partial session is ever created when one of these is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("theme {theme} has {available} assets, {required} required")]
    InsufficientAssets {
        theme: String,
        available: usize,
        required: usize,
    },

    #[error("theme {theme} lists asset {asset} more than once")]
    DuplicateAsset { theme: String, asset: String },

    #[error("invalid theme catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read theme catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
