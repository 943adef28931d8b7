//! Inline citation field codes.
//!
//! A field code is the machine-parsable marker embedded in paragraph prose
//! while a document is still editable:
//!
//! ```text
//! [cite:<citationId>:<paperId>]
//! [cite:<citationId>:<paperId>](<displayText>)
//! ```
//!
//! Field codes are derived, never stored: they exist only as substrings of
//! paragraph text and are recomputed by parsing on every access. All
//! mutations locate the marker by parsing and splice the surrounding text,
//! so display text that happens to resemble a marker can never cause a
//! double substitution.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static FIELD_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[cite:([^:\[\]\s]+):([^:\[\]\s]+)\](?:\(([^()]*)\))?").unwrap()
});

/// A parsed field code with its location in the source text.
///
/// `matched`, `start`, and `end` are only meaningful relative to the text
/// the code was parsed from; offsets are byte offsets into that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCode {
    /// The citation this marker references.
    pub citation_id: String,

    /// The cited paper.
    pub paper_id: String,

    /// User-editable display override, when present.
    pub display_text: Option<String>,

    /// The exact matched substring.
    pub matched: String,

    /// Start offset of the match.
    pub start: usize,

    /// End offset of the match (exclusive).
    pub end: usize,
}

/// Encode a field code marker.
pub fn encode(citation_id: &str, paper_id: &str, display_text: Option<&str>) -> String {
    match display_text {
        Some(text) => format!("[cite:{}:{}]({})", citation_id, paper_id, text),
        None => format!("[cite:{}:{}]", citation_id, paper_id),
    }
}

/// Parse every field code in a text, in left-to-right order.
pub fn parse(text: &str) -> Vec<FieldCode> {
    FIELD_CODE_RE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            FieldCode {
                citation_id: caps[1].to_string(),
                paper_id: caps[2].to_string(),
                display_text: caps.get(3).map(|m| m.as_str().to_string()),
                matched: whole.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
            }
        })
        .collect()
}

/// Find the first marker for a citation id.
pub fn find_by_citation_id(text: &str, citation_id: &str) -> Option<FieldCode> {
    parse(text)
        .into_iter()
        .find(|code| code.citation_id == citation_id)
}

/// Find every marker referencing a paper id.
pub fn find_by_paper_id(text: &str, paper_id: &str) -> Vec<FieldCode> {
    parse(text)
        .into_iter()
        .filter(|code| code.paper_id == paper_id)
        .collect()
}

/// Insert a marker at a byte offset, returning the new text.
///
/// The offset is clamped to the text length and backed up to the nearest
/// character boundary; insertion never fails.
pub fn insert_at(text: &str, offset: usize, marker: &str) -> String {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let mut out = String::with_capacity(text.len() + marker.len());
    out.push_str(&text[..offset]);
    out.push_str(marker);
    out.push_str(&text[offset..]);
    out
}

/// Remove the first marker for a citation id, returning the new text.
/// Text without such a marker is returned unchanged.
pub fn remove(text: &str, citation_id: &str) -> String {
    match find_by_citation_id(text, citation_id) {
        Some(code) => splice(text, &code, ""),
        None => text.to_string(),
    }
}

/// Replace the display text of a citation's marker, returning the new text.
/// Passing `None` strips the display override back to the bare marker form.
pub fn update_display_text(text: &str, citation_id: &str, display_text: Option<&str>) -> String {
    match find_by_citation_id(text, citation_id) {
        Some(code) => {
            let replacement = encode(&code.citation_id, &code.paper_id, display_text);
            splice(text, &code, &replacement)
        }
        None => text.to_string(),
    }
}

/// Markers whose citation id is not in the supplied set of known ids.
///
/// Orphans are reported for the caller to surface as a warning; they are
/// not an error and bulk rewriting leaves them untouched.
pub fn find_orphans(text: &str, known_ids: &HashSet<String>) -> Vec<FieldCode> {
    parse(text)
        .into_iter()
        .filter(|code| !known_ids.contains(&code.citation_id))
        .collect()
}

/// Replace one parsed marker with new content by splicing around its
/// offsets.
fn splice(text: &str, code: &FieldCode, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - code.matched.len() + replacement.len());
    out.push_str(&text[..code.start]);
    out.push_str(replacement);
    out.push_str(&text[code.end..]);
    out
}
