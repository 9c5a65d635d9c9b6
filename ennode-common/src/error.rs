//! Common error types for the Ennode site
//!
//! Raised while loading configuration and alias tables, and when parsing
//! user-supplied values such as locales.

use thiserror::Error;

/// Common result type for Ennode operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the site crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML document could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
