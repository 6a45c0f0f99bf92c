//! Error types for endpoint resolution, model discovery, and image calls.

/// Errors that can occur while talking to an images endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ImgenError {
    /// API key missing or unresolvable.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Edit requested without an input image. Reported before any network
    /// call is made.
    #[error("Please upload an image to edit")]
    MissingImage,

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response carried no usable image data: empty `data`, a missing
    /// `data` field, or result items with neither `url` nor `b64_json`.
    #[error("No output received")]
    NoOutput,

    /// Failed to decode a base64 payload.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// Raster encode/decode error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error (e.g., reading an input image).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for images operations.
pub type Result<T> = std::result::Result<T, ImgenError>;
