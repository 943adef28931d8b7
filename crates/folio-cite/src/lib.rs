//! Citation rendering and numbering engine for manuscript documents.
//!
//! This crate takes:
//! - A [`CitationStyle`](folio_styles::CitationStyle) resolved through the
//!   [`registry`]
//! - [`PaperData`] records for the cited sources
//! - [`Citation`]s tying papers to document paragraphs
//! - Paragraph text containing inline field-code markers
//!
//! And produces rewritten paragraph text plus a numbered bibliography.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          folio-cite                                 │
//! │                 (citation processing engine)                        │
//! │   Paragraphs + Citations + Style → rewritten text + bibliography    │
//! │                                                                     │
//! │   authors ─▶ sort ─▶ resolve (dedup + numbering)                    │
//! │   fieldcode ─▶ intext (in-text rewrite)                             │
//! │   render (bibliography entries)                                     │
//! │   registry + import (style resolution)                              │
//! └───────────────────────────┬─────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         folio-styles                                │
//! │                  (style definition layer)                           │
//! │          JSON exchange format → CitationStyle, rules, sort          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_cite::{CitationEngine, Citation, Paragraph, RenderOptions};
//!
//! let engine = CitationEngine::new();
//! let rendered = engine.process_document(
//!     &paragraphs,
//!     &citations,
//!     "nature",
//!     &RenderOptions::default(),
//! );
//! // rendered.paragraphs carry "[1]"-style in-text citations,
//! // rendered.bibliography one numbered entry per unique paper.
//! ```
//!
//! The engine is purely computational: every operation is a synchronous
//! transformation from inputs to outputs with no shared state. The only
//! I/O anywhere is the importer's URL fetch in [`import`].

pub mod authors;
pub mod engine;
pub mod error;
pub mod fieldcode;
pub mod import;
pub mod intext;
pub mod paper;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod sort;

// Re-export main types
pub use engine::{CitationEngine, RenderOptions, RenderedDocument};
pub use error::{Error, Result};
pub use fieldcode::FieldCode;
pub use intext::{InTextConfig, InTextFormat, NumericStyle};
pub use paper::{AuthorList, Citation, PaperData, Paragraph};
pub use registry::{StyleRegistry, StyleSummary};
pub use render::OutputFormat;
pub use resolve::{CanonicalEntry, NumberingPolicy};
