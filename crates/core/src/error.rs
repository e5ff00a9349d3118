//! Error types for document comparison.
//!
//! Only extraction and configuration failures surface to callers of
//! [`DocumentComparator::compare`](crate::engine::DocumentComparator::compare).
//! Rendering failures are reported through [`RenderError`] and folded into the
//! result notes by the engine.

/// Result type alias for comparison operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for the comparison pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The extractor could not turn document bytes into pages
    #[error("Extraction failed for '{name}': {source}")]
    Extraction {
        /// Display name of the document that failed
        name: String,
        /// Underlying extractor error
        #[source]
        source: ExtractError,
    },

    /// Settings could not be parsed
    #[error("Invalid settings: {0}")]
    Config(#[from] serde_json::Error),

    /// A variable-field pattern failed to compile
    #[error("Invalid variable-field pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised by an [`Extractor`](crate::extractor::Extractor).
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input bytes are not a document the extractor understands
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// The document parsed but uses a layout the extractor cannot represent
    #[error("Unsupported layout: {0}")]
    Unsupported(String),

    /// UTF-8 decoding error
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// JSON layout decoding error
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`Renderer`](crate::render::Renderer).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A highlight could not be placed on the page
    #[error("Page {page} of the {doc} document has a non-finite bounding box")]
    InvalidGeometry {
        /// Zero-based page index
        page: usize,
        /// Which side was being rendered ("source" or "target")
        doc: String,
    },

    /// Backend failure (rasterizer, annotation writer, ...)
    #[error("Renderer backend error: {0}")]
    Backend(String),
}
