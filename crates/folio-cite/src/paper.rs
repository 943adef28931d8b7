//! Input records: papers, citations, and document paragraphs.
//!
//! These are the shapes the external layers hand to the engine — a
//! bibliographic-resolution layer supplies [`PaperData`], the document
//! store supplies [`Paragraph`]s and [`Citation`]s. The engine never
//! mutates them.

use serde::{Deserialize, Serialize};

/// An author list as it appears on the wire: either a single delimited
/// string or an ordered list of names.
///
/// Upstream resolvers disagree on this shape, so both are accepted and
/// normalized lazily by [`crate::authors`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorList {
    /// A single string with comma/ampersand-delimited names.
    Delimited(String),
    /// An ordered list of names.
    Names(Vec<String>),
}

impl Default for AuthorList {
    fn default() -> Self {
        AuthorList::Names(Vec::new())
    }
}

impl From<&str> for AuthorList {
    fn from(value: &str) -> Self {
        AuthorList::Delimited(value.to_string())
    }
}

impl From<Vec<String>> for AuthorList {
    fn from(value: Vec<String>) -> Self {
        AuthorList::Names(value)
    }
}

/// A source paper as resolved by the external bibliographic layer.
///
/// Everything beyond title/authors/year/venue is optional; missing fields
/// degrade to omission at render time, never to an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperData {
    /// Paper title.
    #[serde(default)]
    pub title: String,

    /// Author list (string or list form).
    #[serde(default)]
    pub authors: AuthorList,

    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Venue (journal or conference name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    /// DOI, with or without a "doi:" / resolver-URL prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    /// Volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    /// Issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    /// Page range (e.g., "117-128").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,

    /// Article number (used by styles with article-number page format).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_number: Option<String>,
}

/// A recorded citation: one use of a paper at a location in the document.
///
/// Multiple citations may reference the same paper; they stay distinct
/// records until [`crate::resolve`] deduplicates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Citation id, referenced by field codes in paragraph text.
    pub id: String,

    /// Id of the underlying paper. This is the dedup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,

    /// Owning paragraph's external identifier (e.g., "P3").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_id: Option<String>,

    /// Sequence number in which this citation was inserted into its
    /// paragraph.
    #[serde(default)]
    pub citation_order: i32,

    /// The resolved paper record, when the resolution layer attached one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper: Option<PaperData>,
}

impl Citation {
    /// Numeric order of the owning paragraph, parsed from its "P<N>"
    /// identifier. Missing or non-numeric identifiers parse to 0.
    pub fn paragraph_order(&self) -> i64 {
        self.paragraph_id
            .as_deref()
            .map(paragraph_number)
            .unwrap_or(0)
    }

    /// Whether this citation records an owning paragraph at all.
    pub fn has_paragraph(&self) -> bool {
        self.paragraph_id.is_some()
    }
}

/// A document paragraph: the external identifier plus its text content.
///
/// Content may contain zero or more field-code markers; nothing else in it
/// is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// External identifier (e.g., "P3").
    pub id: String,

    /// Paragraph text.
    pub content: String,
}

impl Paragraph {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Numeric order parsed from the "P<N>" identifier (non-numeric → 0).
    pub fn order(&self) -> i64 {
        paragraph_number(&self.id)
    }
}

/// Parse the numeric part of a "P<N>"-style paragraph identifier.
///
/// Takes the first run of ASCII digits; anything without one parses to 0.
pub fn paragraph_number(id: &str) -> i64 {
    let digits: String = id
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
