//! Citation ordering.
//!
//! All sorts are stable and operate on a copy; callers' citation lists are
//! never mutated. Missing data degrades to a neutral key (0 or an empty
//! string) rather than failing.

use crate::authors;
use crate::paper::{Citation, PaperData};
use folio_styles::{SortConfig, SortMode};
use std::cmp::Ordering;

/// Order citations according to a style's sort policy.
pub fn sort_citations(citations: &[Citation], config: &SortConfig) -> Vec<Citation> {
    let mut sorted = citations.to_vec();
    match config.mode {
        SortMode::CitationOrder => {
            sorted.sort_by_key(citation_order_key);
        }
        SortMode::Alphabetical => {
            sorted.sort_by(compare_alphabetical);
        }
        SortMode::YearThenAuthor => {
            sorted.sort_by(|a, b| {
                year_of(a)
                    .cmp(&year_of(b))
                    .then_with(|| compare_alphabetical(a, b))
            });
        }
        SortMode::VolumeYear => {
            sorted.sort_by_key(|c| (volume_of(c), year_of(c)));
        }
    }
    sorted
}

/// Citation-order sort key: paragraph-less citations float to the front,
/// then paragraph number, then insertion order within the paragraph.
pub(crate) fn citation_order_key(citation: &Citation) -> (bool, i64, i32) {
    (
        citation.has_paragraph(),
        citation.paragraph_order(),
        citation.citation_order,
    )
}

/// Compare two citations by first-author surname.
pub(crate) fn compare_alphabetical(a: &Citation, b: &Citation) -> Ordering {
    compare_name_keys(
        &alphabetical_key(a.paper.as_ref()),
        &alphabetical_key(b.paper.as_ref()),
    )
}

/// Normalized surname of a paper's first author, used as the alphabetical
/// sort key. Papers without authors yield an empty key.
pub(crate) fn alphabetical_key(paper: Option<&PaperData>) -> String {
    let Some(paper) = paper else {
        return String::new();
    };
    let names = authors::author_names(&paper.authors);
    match names.first() {
        Some(first) => normalize_sort_key(&authors::extract_last_name(first)),
        None => String::new(),
    }
}

/// Compare normalized name keys. Empty keys sort after non-empty keys, so
/// citations with no usable author data land at the end of an alphabetical
/// listing rather than the front.
pub(crate) fn compare_name_keys(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// Normalize a string for sort comparison: split on separators (whitespace,
/// quotes, commas, brackets), case-fold, rejoin with single spaces.
pub(crate) fn normalize_sort_key(s: &str) -> String {
    s.split(is_sort_word_separator)
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_sort_word_separator(c: char) -> bool {
    c.is_whitespace()
        || c == '\''
        || c == '\u{2019}' // RIGHT SINGLE QUOTATION MARK
        || c == '\u{2018}' // LEFT SINGLE QUOTATION MARK
        || c == '\u{201C}' // LEFT DOUBLE QUOTATION MARK
        || c == '\u{201D}' // RIGHT DOUBLE QUOTATION MARK
        || c == '"'
        || c == ','
        || c == '['
        || c == ']'
}

fn year_of(citation: &Citation) -> i32 {
    citation
        .paper
        .as_ref()
        .and_then(|p| p.year)
        .unwrap_or(0)
}

/// Numeric volume; missing or non-numeric volumes sort as 0.
fn volume_of(citation: &Citation) -> i64 {
    citation
        .paper
        .as_ref()
        .and_then(|p| p.volume.as_deref())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}
