//! Error types for membership card rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the membership card library.
#[derive(Error, Debug)]
pub enum CardError {
    /// Output directory creation failed.
    #[error("Failed to create output directory '{path}': {message}")]
    OutputDirError { path: PathBuf, message: String },

    /// The PDF document or one of its base resources could not be set up.
    #[error("Failed to initialize card document: {0}")]
    DocumentInit(String),

    /// The finished document could not be serialized.
    #[error("Failed to serialize card document: {0}")]
    Serialization(String),

    /// Writing the finished document failed.
    #[error("Failed to save card to '{path}': {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// The QR payload could not be encoded into a matrix.
    #[error("QR code encoding failed: {0}")]
    QrEncoding(String),

    /// Writing or reading back the QR scratch raster failed.
    #[error("QR raster staging failed: {0}")]
    QrStaging(String),

    /// The logo file exists but could not be decoded.
    #[error("Failed to load logo '{path}': {message}")]
    LogoLoad { path: PathBuf, message: String },

    /// An image could not be placed on the canvas.
    #[error("Failed to embed image: {0}")]
    ImageEmbed(String),

    /// The extended-script font pair could not be registered.
    #[error("Failed to register font '{path}': {message}")]
    FontRegistration { path: PathBuf, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CardError {
    /// Whether this error aborts a render.
    ///
    /// QR, logo and font failures only remove one decorative element (or
    /// downgrade the typeface); everything else invalidates the output.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            CardError::QrEncoding(_)
                | CardError::QrStaging(_)
                | CardError::LogoLoad { .. }
                | CardError::ImageEmbed(_)
                | CardError::FontRegistration { .. }
        )
    }
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, CardError>;

impl From<printpdf::Error> for CardError {
    fn from(err: printpdf::Error) -> Self {
        CardError::DocumentInit(err.to_string())
    }
}
