//! Error types for nextgsim

use thiserror::Error;

use crate::bit_buffer::BitError;

/// Error types for the nextgsim support library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bit cursor errors surfaced outside a codec.
    #[error("Bit buffer error: {0}")]
    Bit(#[from] BitError),

    /// File I/O errors while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
