//! Core citation style types and their JSON exchange format.
//!
//! A [`CitationStyle`] is loaded read-only per render request. System styles
//! are immutable constants bundled with the engine; user styles arrive
//! through the importer and are treated identically once validated.
//!
//! Wire format: camelCase keys, kebab-case enum strings. Every rule group
//! beyond the required ones has defaults, so a minimal style only carries
//! identity, sort config, author rules, and a template.

use serde::{Deserialize, Serialize};

/// A citation style: identity, ordering policy, formatting rules, and the
/// reference template.
///
/// Invariant (enforced by [`crate::validate`]): `template` contains at
/// minimum the `{authors}`, `{journal}`, and `{year}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationStyle {
    /// Stable identifier (e.g., "nature").
    pub id: String,

    /// Machine name.
    pub name: String,

    /// Human-readable name shown in style pickers.
    pub display_name: String,

    /// Ordering policy for bibliography entries and citation numbering.
    pub sort: SortConfig,

    /// Author list formatting rules.
    pub author_rules: AuthorRules,

    /// Title formatting rules.
    #[serde(default)]
    pub title: TitleRules,

    /// Journal/venue formatting rules.
    #[serde(default)]
    pub journal: JournalRules,

    /// Volume, issue, and pages formatting rules.
    #[serde(default)]
    pub volume: VolumeRules,

    /// DOI formatting rules.
    #[serde(default)]
    pub doi: DoiRules,

    /// Year formatting rules.
    #[serde(default)]
    pub year: YearRules,

    /// Reference template with `{authors} {title} {journal} {volume}
    /// {pages} {year} {doi}` placeholders.
    pub template: String,
}

/// Sort configuration for a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// The ordering mode.
    pub mode: SortMode,
}

/// Bibliography ordering mode.
///
/// Unknown wire strings degrade to [`SortMode::CitationOrder`] at
/// deserialization time rather than failing the whole style — an unknown
/// mode must never abort a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortMode {
    /// Order of insertion: paragraph number, then citation order.
    #[default]
    CitationOrder,
    /// First author's surname, case-folded.
    Alphabetical,
    /// Year ascending, then surname.
    YearThenAuthor,
    /// Numeric volume ascending, then year.
    VolumeYear,
}

impl SortMode {
    /// The wire string for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::CitationOrder => "citation-order",
            SortMode::Alphabetical => "alphabetical",
            SortMode::YearThenAuthor => "year-then-author",
            SortMode::VolumeYear => "volume-year",
        }
    }
}

impl From<String> for SortMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "alphabetical" => SortMode::Alphabetical,
            "year-then-author" => SortMode::YearThenAuthor,
            "volume-year" => SortMode::VolumeYear,
            // "citation-order" and anything unrecognized
            _ => SortMode::CitationOrder,
        }
    }
}

impl From<SortMode> for String {
    fn from(mode: SortMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Author list formatting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRules {
    /// Maximum authors shown in full references.
    #[serde(default = "default_max_authors")]
    pub max_authors: u32,

    /// Et-al threshold: author lists longer than this are truncated to the
    /// first `et_al_after` names and suffixed with " et al.". Zero disables
    /// truncation.
    #[serde(default)]
    pub et_al_after: u32,

    /// Delimiter between authors.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Delimiter before the final author.
    #[serde(default = "default_final_delimiter")]
    pub final_delimiter: String,

    /// Name form for each author.
    #[serde(default)]
    pub format: NameFormat,
}

impl Default for AuthorRules {
    fn default() -> Self {
        Self {
            max_authors: default_max_authors(),
            et_al_after: 0,
            delimiter: default_delimiter(),
            final_delimiter: default_final_delimiter(),
            format: NameFormat::default(),
        }
    }
}

/// Name form for a single author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameFormat {
    /// "Surname, Initials" (surname-first heuristic).
    #[default]
    LastNameFirstInitial,
    /// The author string unchanged.
    LastNameFirstName,
}

/// Title formatting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRules {
    /// Whether the title appears in references at all.
    #[serde(default = "default_true")]
    pub include: bool,

    /// Punctuation appended to the title unless already present.
    #[serde(default = "default_end_punctuation")]
    pub end_punctuation: String,
}

impl Default for TitleRules {
    fn default() -> Self {
        Self {
            include: true,
            end_punctuation: default_end_punctuation(),
        }
    }
}

/// Journal/venue formatting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRules {
    /// Prefer the paper's venue field when non-empty.
    #[serde(default = "default_true")]
    pub use_venue: bool,

    /// Abbreviation used when the venue is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_abbreviation: Option<String>,

    /// Wrap the journal name in emphasis markup.
    #[serde(default = "default_true")]
    pub use_italic: bool,
}

impl Default for JournalRules {
    fn default() -> Self {
        Self {
            use_venue: true,
            fallback_abbreviation: None,
            use_italic: true,
        }
    }
}

/// Volume, issue, and pages formatting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeRules {
    /// Wrap the volume in bold markup.
    #[serde(default)]
    pub bold: bool,

    /// Append the issue in parentheses after the volume.
    #[serde(default)]
    pub include_issue: bool,

    /// How the pages fragment is resolved.
    #[serde(default)]
    pub format: PagesFormat,
}

/// How the pages placeholder is resolved from paper data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PagesFormat {
    /// The page range verbatim.
    #[default]
    Range,
    /// Only the starting page (substring before the first hyphen/en-dash).
    StartOnly,
    /// The article number, falling back to pages.
    ArticleNumber,
}

/// DOI formatting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoiRules {
    /// Whether the DOI appears in references.
    #[serde(default = "default_true")]
    pub include: bool,
}

impl Default for DoiRules {
    fn default() -> Self {
        Self { include: true }
    }
}

/// Year formatting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRules {
    /// How the year fragment is rendered.
    #[serde(default)]
    pub format: YearFormat,
}

/// Year fragment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YearFormat {
    /// "(2020)"
    #[default]
    Parentheses,
    /// ", 2020" — placed flush against the preceding fragment.
    AfterComma,
}

fn default_max_authors() -> u32 {
    10
}

fn default_delimiter() -> String {
    ", ".to_string()
}

fn default_final_delimiter() -> String {
    " & ".to_string()
}

fn default_end_punctuation() -> String {
    ".".to_string()
}

fn default_true() -> bool {
    true
}
