//! Citation style definitions for the Folio citation engine.
//!
//! This crate defines the semantic types for citation styles — sorting
//! policy, author formatting rules, per-field formatting rules, and the
//! reference template — along with the JSON exchange format used to
//! transmit and persist them, and the validation that the style importer
//! runs on externally supplied definitions.
//!
//! Style processing (rendering, sorting, numbering) lives in `folio-cite`;
//! this crate only answers "what does this style say".

pub mod error;
pub mod types;
pub mod validate;

// Re-export main types
pub use error::{Error, Result};
pub use types::{
    AuthorRules, CitationStyle, DoiRules, JournalRules, NameFormat, PagesFormat, SortConfig,
    SortMode, TitleRules, VolumeRules, YearFormat, YearRules,
};
pub use validate::{parse_style, parse_style_value, validate_style_value};
