//! Error types for the citation engine.
//!
//! Rendering never errors — malformed or partial paper/style data degrades
//! to placeholders and omissions. The variants here cover the only loud
//! failure paths: style import validation and the importer's URL fetch.

/// Result type alias for folio-cite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the style importer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style definition failed validation.
    #[error(transparent)]
    Style(#[from] folio_styles::Error),

    /// The URL import's network fetch failed.
    #[error("failed to fetch style from '{url}': {message}")]
    Fetch { url: String, message: String },

    /// The URL served a content type the importer does not handle.
    #[error("cannot import style with content type '{content_type}': CSL XML import is not yet implemented")]
    UnsupportedContentType { content_type: String },
}
