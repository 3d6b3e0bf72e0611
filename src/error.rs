//! Error types for the gallery

use thiserror::Error;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the gallery
#[derive(Error, Debug)]
pub enum Error {
    /// The card for this item has no placeholder left to replace
    #[error("No placeholder surface for item {0}")]
    MissingSurface(u64),

    /// Failed to render or encode a surface
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// I/O failure while reading config or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

#[cfg(feature = "raster")]
impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::RenderError(err.to_string())
    }
}
