//! Error types for style definition validation.

/// Result type alias for folio-styles operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating a style definition.
///
/// These are user-correctable authoring errors: every variant names the
/// missing or malformed requirement so the caller can surface an actionable
/// message next to the offending definition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The definition is not a JSON object.
    #[error("style definition must be a JSON object")]
    NotAnObject,

    /// A required top-level field is absent or empty.
    #[error("style definition is missing required field '{field}'")]
    MissingField { field: String },

    /// The template lacks one of the required placeholders.
    #[error("style template is missing required placeholder '{placeholder}'")]
    MissingPlaceholder { placeholder: String },

    /// A field is present but has the wrong shape.
    #[error("style field '{field}' is invalid: {message}")]
    InvalidField { field: String, message: String },

    /// The definition is not parseable JSON at all.
    #[error("style definition is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
