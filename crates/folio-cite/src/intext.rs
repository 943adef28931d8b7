//! In-text citation rendering.
//!
//! Resolves a field code to its visible inline form — numeric ("[3]"),
//! author-date ("(Zimmer & Adams, 2021)"), or author-year
//! ("Zimmer & Adams (2021)") — and rewrites whole paragraphs in bulk.

use crate::authors;
use crate::fieldcode::{self, FieldCode};
use crate::paper::{Citation, PaperData};
use folio_styles::{AuthorRules, CitationStyle, SortMode};
use std::collections::HashMap;

/// Target form for in-text citations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InTextFormat {
    /// "[n]" or "(n)"; falls through to author-date when no number is
    /// available.
    #[default]
    Numeric,
    /// "(Authors, Year)".
    AuthorDate,
    /// "Authors (Year)" — no parentheses around the whole unit.
    AuthorYear,
}

/// Bracket form for numeric citations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericStyle {
    /// "[3]"
    #[default]
    Brackets,
    /// "(3)"
    Parentheses,
}

/// Per-render in-text configuration.
///
/// An explicit config from the caller is authoritative; the style only
/// supplies a default via [`InTextConfig::from_style`] when the caller
/// passes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InTextConfig {
    pub format: InTextFormat,
    pub numeric_style: NumericStyle,

    /// Et-al threshold for in-text author lists, distinct from the style's
    /// bibliography-level threshold — in-text citations commonly truncate
    /// more aggressively than full references.
    pub max_authors: Option<u32>,
}

impl InTextConfig {
    /// Default config implied by a style: appearance ordering implies the
    /// numeric bracket form, anything else implies author-date.
    pub fn from_style(style: &CitationStyle) -> Self {
        let format = match style.sort.mode {
            SortMode::CitationOrder => InTextFormat::Numeric,
            _ => InTextFormat::AuthorDate,
        };
        Self {
            format,
            ..Default::default()
        }
    }
}

/// Render one field code to its visible inline form.
///
/// Falls back through: requested form → the field code's own display text →
/// a synthesized "(Authors, Year)". Never fails.
pub fn render_in_text(
    code: &FieldCode,
    paper: Option<&PaperData>,
    style: &CitationStyle,
    number: Option<usize>,
    config: &InTextConfig,
) -> String {
    let rendered = match config.format {
        InTextFormat::Numeric => number
            .map(|n| render_numeric(n, config.numeric_style))
            .or_else(|| author_date(paper, style, config)),
        InTextFormat::AuthorDate => author_date(paper, style, config),
        InTextFormat::AuthorYear => author_year(paper, style, config),
    };

    rendered
        .or_else(|| code.display_text.clone())
        .unwrap_or_else(|| synthesized(style, config))
}

/// Rewrite a full paragraph, substituting every recognized field code with
/// its rendered in-text form.
///
/// Markers are processed in descending start-offset order: earlier
/// substitutions change the string length, so ascending order would
/// invalidate every later offset. This is a correctness requirement, not an
/// optimization. Field codes whose citation id has no entry in `citations`
/// are left untouched.
pub fn render_paragraph_content(
    content: &str,
    citations: &HashMap<String, Citation>,
    numbers: &HashMap<String, usize>,
    style: &CitationStyle,
    config: &InTextConfig,
) -> String {
    let mut codes = fieldcode::parse(content);
    codes.sort_by(|a, b| b.start.cmp(&a.start));

    let mut out = content.to_string();
    for code in codes {
        let Some(citation) = citations.get(&code.citation_id) else {
            continue;
        };
        let number_key = citation.paper_id.as_deref().unwrap_or(&citation.id);
        let number = numbers.get(number_key).copied();
        let rendered = render_in_text(&code, citation.paper.as_ref(), style, number, config);
        out.replace_range(code.start..code.end, &rendered);
    }
    out
}

fn render_numeric(number: usize, style: NumericStyle) -> String {
    match style {
        NumericStyle::Brackets => format!("[{}]", number),
        NumericStyle::Parentheses => format!("({})", number),
    }
}

fn author_date(
    paper: Option<&PaperData>,
    style: &CitationStyle,
    config: &InTextConfig,
) -> Option<String> {
    let paper = paper?;
    let authors = authors::format_authors(&paper.authors, &in_text_rules(style, config));
    Some(match paper.year {
        Some(year) => format!("({}, {})", authors, year),
        None => format!("({})", authors),
    })
}

fn author_year(
    paper: Option<&PaperData>,
    style: &CitationStyle,
    config: &InTextConfig,
) -> Option<String> {
    let paper = paper?;
    let authors = authors::format_authors(&paper.authors, &in_text_rules(style, config));
    Some(match paper.year {
        Some(year) => format!("{} ({})", authors, year),
        None => authors,
    })
}

/// Last resort when no paper, number, or display text is available.
fn synthesized(style: &CitationStyle, config: &InTextConfig) -> String {
    let authors = authors::format_authors(&Default::default(), &in_text_rules(style, config));
    format!("({})", authors)
}

/// The style's author rules with the in-text et-al override applied.
fn in_text_rules(style: &CitationStyle, config: &InTextConfig) -> AuthorRules {
    let mut rules = style.author_rules.clone();
    if let Some(max) = config.max_authors {
        rules.et_al_after = max;
    }
    rules
}
