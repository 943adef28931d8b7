//! Bibliography entry rendering.
//!
//! A reference is assembled from formatted fragments — authors, title,
//! journal, volume, pages, doi, year — substituted into the style's
//! template. Missing optional fields degrade to an empty fragment; this
//! path never errors.

use crate::authors;
use crate::paper::PaperData;
use folio_styles::{CitationStyle, PagesFormat, YearFormat};

/// Markup flavor for emphasis and bold wrapping in rendered references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// No markup.
    #[default]
    Plain,
    /// `*emphasis*` and `**bold**`.
    Markdown,
    /// `<em>` and `<strong>` tags.
    Html,
    /// `\textit{}` and `\textbf{}` commands.
    Latex,
}

impl OutputFormat {
    /// Wrap text in this format's emphasis markup. Empty text stays empty.
    pub fn emphasis(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self {
            OutputFormat::Plain => text.to_string(),
            OutputFormat::Markdown => format!("*{}*", text),
            OutputFormat::Html => format!("<em>{}</em>", text),
            OutputFormat::Latex => format!("\\textit{{{}}}", text),
        }
    }

    /// Wrap text in this format's bold markup. Empty text stays empty.
    pub fn bold(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self {
            OutputFormat::Plain => text.to_string(),
            OutputFormat::Markdown => format!("**{}**", text),
            OutputFormat::Html => format!("<strong>{}</strong>", text),
            OutputFormat::Latex => format!("\\textbf{{{}}}", text),
        }
    }
}

/// Render one bibliography entry from paper data and a style template.
///
/// When `number` is supplied the entry is prefixed `"<n>. "`, as used by
/// appearance-numbered bibliographies.
pub fn render_reference(
    paper: &PaperData,
    style: &CitationStyle,
    format: OutputFormat,
    number: Option<usize>,
) -> String {
    let authors = authors::format_authors(&paper.authors, &style.author_rules);
    let title = format_title(paper, style);
    let journal = format_journal(paper, style, format);
    let volume = format_volume(paper, style, format);
    let pages = format_pages(paper, style);
    let doi = format_doi(paper, style);
    let year = format_year(paper, style);

    let mut entry = style.template.clone();

    // The adjacent "{volume}, {pages}" pair collapses to a filtered join so
    // a missing half doesn't leave a dangling comma.
    if entry.contains("{volume}, {pages}") {
        let parts: Vec<&str> = [volume.as_str(), pages.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        entry = entry.replace("{volume}, {pages}", &parts.join(", "));
    }

    entry = entry
        .replace("{authors}", &authors)
        .replace("{title}", &title)
        .replace("{journal}", &journal)
        .replace("{volume}", &volume)
        .replace("{pages}", &pages)
        .replace("{year}", &year)
        .replace("{doi}", &doi);

    if let Some(n) = number {
        entry = format!("{}. {}", n, entry);
    }

    collapse_whitespace(&entry)
}

/// Title fragment: sentence-cased first character plus the configured end
/// punctuation when not already present.
fn format_title(paper: &PaperData, style: &CitationStyle) -> String {
    if !style.title.include {
        return String::new();
    }
    let title = paper.title.trim();
    if title.is_empty() {
        return String::new();
    }

    let mut out = capitalize_first(title);
    let end = &style.title.end_punctuation;
    if !end.is_empty() && !out.ends_with(end.as_str()) {
        out.push_str(end);
    }
    out
}

/// Journal fragment: venue when preferred and present, else the style's
/// fallback abbreviation, else the raw venue; optionally italicized.
fn format_journal(paper: &PaperData, style: &CitationStyle, format: OutputFormat) -> String {
    let venue = paper.venue.as_deref().unwrap_or("").trim();
    let fallback = style
        .journal
        .fallback_abbreviation
        .as_deref()
        .unwrap_or("")
        .trim();

    let name = if style.journal.use_venue && !venue.is_empty() {
        venue
    } else if !fallback.is_empty() {
        fallback
    } else {
        venue
    };

    if name.is_empty() {
        return String::new();
    }
    if style.journal.use_italic {
        format.emphasis(name)
    } else {
        name.to_string()
    }
}

/// Volume fragment: the volume (optionally bold) with the issue appended in
/// parentheses when configured.
fn format_volume(paper: &PaperData, style: &CitationStyle, format: OutputFormat) -> String {
    let volume = paper.volume.as_deref().unwrap_or("").trim();
    if volume.is_empty() {
        return String::new();
    }

    let mut out = if style.volume.bold {
        format.bold(volume)
    } else {
        volume.to_string()
    };

    if style.volume.include_issue {
        if let Some(issue) = paper.issue.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            out.push_str(&format!("({})", issue));
        }
    }
    out
}

/// Pages fragment, resolved per the style's pages format.
fn format_pages(paper: &PaperData, style: &CitationStyle) -> String {
    let pages = paper.pages.as_deref().unwrap_or("").trim();
    match style.volume.format {
        PagesFormat::ArticleNumber => paper
            .article_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(pages)
            .to_string(),
        PagesFormat::Range => pages.to_string(),
        PagesFormat::StartOnly => pages
            .split(['-', '\u{2013}'])
            .next()
            .unwrap_or("")
            .trim()
            .to_string(),
    }
}

/// DOI fragment: prefixed with "doi:" unless an accepted prefix is already
/// present; empty when disabled or absent.
fn format_doi(paper: &PaperData, style: &CitationStyle) -> String {
    if !style.doi.include {
        return String::new();
    }
    let doi = paper.doi.as_deref().unwrap_or("").trim();
    if doi.is_empty() {
        return String::new();
    }
    if doi.starts_with("doi:") || doi.starts_with("https://doi.org/") {
        doi.to_string()
    } else {
        format!("doi:{}", doi)
    }
}

/// Year fragment, parenthesized or comma-led per the style.
fn format_year(paper: &PaperData, style: &CitationStyle) -> String {
    let Some(year) = paper.year else {
        return String::new();
    };
    match style.year.format {
        YearFormat::Parentheses => format!("({})", year),
        YearFormat::AfterComma => format!(", {}", year),
    }
}

/// Uppercase the first character, leaving the rest unchanged.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Collapse runs of whitespace to single spaces and trim.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
