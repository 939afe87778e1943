use thiserror::Error;

/// Errors raised by the pixel buffer and its snapshots
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Failed to encode canvas snapshot: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Failed to decode canvas snapshot: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Failed to load font: {0}")]
    Font(String),
}

/// Errors raised while running the upload + analysis exchange
#[derive(Error, Debug)]
pub enum CalculateError {
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("Image upload failed: {status} {status_text}")]
    UploadStatus { status: u16, status_text: String },
    #[error("Calculation failed: {status} {status_text}")]
    CalculateStatus { status: u16, status_text: String },
    #[error("Malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to build request body: {0}")]
    RequestBody(#[source] serde_json::Error),
}
