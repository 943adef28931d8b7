//! Author list formatting.
//!
//! Names use a simple surname-first heuristic: the surname is the first
//! comma-delimited token, or the first whitespace token when there is no
//! comma. Internationalized name parsing is out of scope.

use crate::paper::AuthorList;
use folio_styles::{AuthorRules, NameFormat};

/// Placeholder rendered when a paper carries no author information.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Normalize an author list to individual names.
///
/// The delimited string form splits on commas and ampersands; entries are
/// trimmed and empties discarded.
pub fn author_names(authors: &AuthorList) -> Vec<String> {
    match authors {
        AuthorList::Delimited(s) => split_author_string(s),
        AuthorList::Names(names) => names
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
    }
}

/// Split a delimited author string on commas and ampersands.
pub fn split_author_string(authors: &str) -> Vec<String> {
    authors
        .split([',', '&'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format an author list according to a style's author rules.
///
/// Never fails: an empty list renders as [`UNKNOWN_AUTHOR`].
pub fn format_authors(authors: &AuthorList, rules: &AuthorRules) -> String {
    let names = author_names(authors);
    if names.is_empty() {
        return UNKNOWN_AUTHOR.to_string();
    }

    let truncate = rules.et_al_after > 0 && names.len() > rules.et_al_after as usize;
    let kept = if truncate {
        &names[..rules.et_al_after as usize]
    } else {
        &names[..]
    };

    let formatted: Vec<String> = kept.iter().map(|n| format_name(n, rules.format)).collect();

    let joined = match formatted.as_slice() {
        [single] => single.clone(),
        [first, second] => format!("{}{}{}", first, rules.final_delimiter, second),
        _ => {
            // 3+: all-but-last joined with the item delimiter, the last
            // appended with the final delimiter.
            let (last, rest) = formatted.split_last().unwrap();
            format!(
                "{}{}{}",
                rest.join(&rules.delimiter),
                rules.final_delimiter,
                last
            )
        }
    };

    if truncate {
        format!("{} et al.", joined)
    } else {
        joined
    }
}

/// Format a single author name per the style's name form.
fn format_name(name: &str, format: NameFormat) -> String {
    match format {
        NameFormat::LastNameFirstName => name.trim().to_string(),
        NameFormat::LastNameFirstInitial => {
            let (surname, rest) = split_surname(name);
            let initials = rest.split_whitespace().collect::<Vec<_>>().join(" ");
            if initials.is_empty() {
                surname
            } else {
                format!("{}, {}", surname, initials)
            }
        }
    }
}

/// Extract the surname from an author name.
///
/// Standalone operation reused by sorting; applies the same comma/whitespace
/// heuristic regardless of any truncation settings.
pub fn extract_last_name(author: &str) -> String {
    split_surname(author).0
}

/// Split a name into (surname, remainder) using the surname-first heuristic.
fn split_surname(name: &str) -> (String, String) {
    let name = name.trim();
    if let Some((surname, rest)) = name.split_once(',') {
        return (surname.trim().to_string(), rest.trim().to_string());
    }
    match name.split_once(char::is_whitespace) {
        Some((surname, rest)) => (surname.to_string(), rest.trim().to_string()),
        None => (name.to_string(), String::new()),
    }
}
