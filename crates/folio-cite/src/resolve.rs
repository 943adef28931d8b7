//! Citation deduplication and bibliography numbering.
//!
//! Citations are grouped by their underlying paper, one representative is
//! chosen per group, and the resulting canonical entries receive stable
//! bibliography numbers under one of two policies: alphabetical or
//! order-of-first-appearance in the document prose.
//!
//! Appearance ordering is resolved through an explicit chain of strategies
//! tried in sequence — marker position, then citation-order comparison,
//! then a wholesale alphabetical fallback — so partially migrated or
//! malformed data degrades predictably instead of failing.

use crate::paper::{Citation, PaperData, Paragraph};
use crate::render::{self, OutputFormat};
use crate::sort;
use folio_styles::{CitationStyle, SortMode};
use std::cmp::Ordering;
use std::collections::HashMap;

/// The deduplicated view of one unique cited paper.
#[derive(Debug, Clone)]
pub struct CanonicalEntry {
    /// Dedup key: the paper id when present, otherwise the citation id of
    /// a paper-bearing citation that lacks one.
    pub key: String,

    /// Earliest recorded citation of this paper (by paragraph order, then
    /// citation order). Its `paper` is resolved from the group: the
    /// representative's own record, else the first member that carries one.
    pub representative: Citation,

    /// Every citation in the group, in recorded order.
    pub members: Vec<Citation>,
}

impl CanonicalEntry {
    /// The resolved paper record for this entry, if any member carried one.
    pub fn paper(&self) -> Option<&PaperData> {
        self.representative.paper.as_ref()
    }

    /// Citation ids of every member.
    pub fn citation_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|c| c.id.as_str())
    }
}

/// Number-assignment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberingPolicy {
    /// Numbers follow the alphabetical order of the deduplicated list.
    Alphabetical,
    /// Numbers follow the first textual occurrence of each paper's marker
    /// when reading the document top to bottom.
    #[default]
    Appearance,
}

impl NumberingPolicy {
    /// The policy implied by a style's sort mode. Appearance numbering goes
    /// with insertion-ordered styles; author-sorted styles number
    /// alphabetically.
    pub fn for_mode(mode: SortMode) -> Self {
        match mode {
            SortMode::Alphabetical | SortMode::YearThenAuthor => NumberingPolicy::Alphabetical,
            SortMode::CitationOrder | SortMode::VolumeYear => NumberingPolicy::Appearance,
        }
    }
}

/// Group citations by underlying paper and pick one representative each.
///
/// The dedup key is the paper id — the citation's underlying paper, not the
/// citation record. Citations with an attached paper but no paper id form
/// singleton groups keyed by their citation id. Citations with neither are
/// discarded.
pub fn dedup_citations(citations: &[Citation]) -> Vec<CanonicalEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Citation>> = HashMap::new();

    for citation in citations {
        let key = match (&citation.paper_id, &citation.paper) {
            (Some(paper_id), _) => paper_id.clone(),
            (None, Some(_)) => citation.id.clone(),
            (None, None) => continue,
        };
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(citation.clone());
    }

    order
        .into_iter()
        .filter_map(|key| {
            let members = groups.remove(&key)?;
            let mut representative = members
                .iter()
                .min_by_key(|c| (c.paragraph_order(), c.citation_order))
                .cloned()?;
            if representative.paper.is_none() {
                representative.paper = members.iter().find_map(|c| c.paper.clone());
            }
            // A group with neither a resolvable paper id nor any paper
            // record was never created above, so every entry here renders.
            Some(CanonicalEntry {
                key,
                representative,
                members,
            })
        })
        .collect()
}

/// Assign bibliography numbers 1..N to the canonical entries.
///
/// Returns the entries in number order alongside the key→number map used by
/// in-text rendering. Every entry receives exactly one number and no number
/// repeats.
pub fn assign_numbers(
    entries: &[CanonicalEntry],
    policy: NumberingPolicy,
    paragraphs: &[Paragraph],
) -> (Vec<CanonicalEntry>, HashMap<String, usize>) {
    let ordered = match policy {
        NumberingPolicy::Alphabetical => alphabetical_order(entries),
        NumberingPolicy::Appearance => appearance_order(entries, paragraphs),
    };

    let numbers = ordered
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.key.clone(), i + 1))
        .collect();

    (ordered, numbers)
}

/// Render the bibliography for a set of numbered entries.
///
/// Entries are laid out by the style's own sort mode; each is paired with
/// its number only under the appearance policy — alphabetical bibliographies
/// are ordered but unnumbered.
pub fn build_bibliography(
    entries: &[CanonicalEntry],
    numbers: &HashMap<String, usize>,
    style: &CitationStyle,
    policy: NumberingPolicy,
    format: OutputFormat,
) -> Vec<String> {
    let representatives: Vec<Citation> = entries
        .iter()
        .map(|e| e.representative.clone())
        .collect();
    let key_by_citation: HashMap<&str, &str> = entries
        .iter()
        .map(|e| (e.representative.id.as_str(), e.key.as_str()))
        .collect();

    sort::sort_citations(&representatives, &style.sort)
        .iter()
        .filter_map(|citation| {
            let paper = citation.paper.as_ref()?;
            let number = match policy {
                NumberingPolicy::Appearance => key_by_citation
                    .get(citation.id.as_str())
                    .and_then(|key| numbers.get(*key))
                    .copied(),
                NumberingPolicy::Alphabetical => None,
            };
            Some(render::render_reference(paper, style, format, number))
        })
        .collect()
}

fn alphabetical_order(entries: &[CanonicalEntry]) -> Vec<CanonicalEntry> {
    let mut ordered = entries.to_vec();
    ordered.sort_by(|a, b| compare_alpha(a, b));
    ordered
}

/// First textual position of an entry's marker: (paragraph order, byte
/// offset within the paragraph). `None` when no member's marker can be
/// located.
fn placement(entry: &CanonicalEntry, by_id: &HashMap<&str, &Paragraph>) -> Option<(i64, usize)> {
    entry
        .members
        .iter()
        .filter_map(|citation| {
            let paragraph = by_id.get(citation.paragraph_id.as_deref()?)?;
            let marker_prefix = format!("[cite:{}:", citation.id);
            let offset = paragraph.content.find(&marker_prefix)?;
            Some((paragraph.order(), offset))
        })
        .min()
}

fn appearance_order(entries: &[CanonicalEntry], paragraphs: &[Paragraph]) -> Vec<CanonicalEntry> {
    // Ultimate fallback: with no paragraph/order metadata anywhere in the
    // set there is nothing positional to compare, so degrade to the
    // alphabetical policy wholesale.
    let no_metadata = entries.iter().all(|e| {
        e.members
            .iter()
            .all(|c| c.paragraph_id.is_none() && c.citation_order == 0)
    });
    if no_metadata {
        return alphabetical_order(entries);
    }

    let by_id: HashMap<&str, &Paragraph> =
        paragraphs.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut placed: Vec<(Option<(i64, usize)>, &CanonicalEntry)> = entries
        .iter()
        .map(|entry| (placement(entry, &by_id), entry))
        .collect();

    // Strategies tried in sequence; each decides or passes to the next.
    placed.sort_by(|a, b| {
        compare_placements(a.0, b.0)
            .then_with(|| compare_citation_order(a.1, b.1))
            .then_with(|| compare_alpha(a.1, b.1))
    });

    placed.into_iter().map(|(_, entry)| entry.clone()).collect()
}

/// Compare marker placements; entries with no locatable marker sort last.
/// Equal (including both-unplaced) defers to the next strategy.
fn compare_placements(a: Option<(i64, usize)>, b: Option<(i64, usize)>) -> Ordering {
    match (a, b) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_citation_order(a: &CanonicalEntry, b: &CanonicalEntry) -> Ordering {
    sort::citation_order_key(&a.representative).cmp(&sort::citation_order_key(&b.representative))
}

fn compare_alpha(a: &CanonicalEntry, b: &CanonicalEntry) -> Ordering {
    sort::compare_name_keys(
        &sort::alphabetical_key(a.paper()),
        &sort::alphabetical_key(b.paper()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::AuthorList;
    use folio_styles::{AuthorRules, SortConfig};
    use std::collections::HashSet;

    fn paper(authors: &str, year: i32) -> PaperData {
        PaperData {
            title: "T".to_string(),
            authors: AuthorList::Delimited(authors.to_string()),
            year: Some(year),
            venue: Some("J".to_string()),
            ..Default::default()
        }
    }

    fn citation(
        id: &str,
        paper_id: Option<&str>,
        paragraph: Option<&str>,
        order: i32,
        p: Option<PaperData>,
    ) -> Citation {
        Citation {
            id: id.to_string(),
            paper_id: paper_id.map(str::to_string),
            paragraph_id: paragraph.map(str::to_string),
            citation_order: order,
            paper: p,
        }
    }

    #[test]
    fn test_dedup_groups_by_paper_id() {
        let citations = vec![
            citation("c1", Some("p1"), Some("P1"), 0, Some(paper("Zimmer, A", 2020))),
            citation("c2", Some("p1"), Some("P3"), 0, Some(paper("Zimmer, A", 2020))),
            citation("c3", Some("p2"), Some("P2"), 0, Some(paper("Adams, B", 2019))),
        ];
        let entries = dedup_citations(&citations);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "p1");
        assert_eq!(entries[0].members.len(), 2);
        assert_eq!(entries[0].representative.id, "c1");
    }

    #[test]
    fn test_representative_is_earliest_by_paragraph_then_order() {
        let citations = vec![
            citation("late", Some("p1"), Some("P5"), 0, Some(paper("Zimmer, A", 2020))),
            citation("early", Some("p1"), Some("P2"), 1, Some(paper("Zimmer, A", 2020))),
            citation("earlier", Some("p1"), Some("P2"), 0, None),
        ];
        let entries = dedup_citations(&citations);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].representative.id, "earlier");
        // paper resolved from another member of the group
        assert!(entries[0].paper().is_some());
    }

    #[test]
    fn test_dedup_discards_citations_with_neither_paper_nor_id() {
        let citations = vec![
            citation("c1", None, Some("P1"), 0, None),
            citation("c2", None, Some("P1"), 1, Some(paper("Adams, B", 2019))),
        ];
        let entries = dedup_citations(&citations);
        assert_eq!(entries.len(), 1);
        // keyed by citation id in the absence of a paper id
        assert_eq!(entries[0].key, "c2");
    }

    #[test]
    fn test_alphabetical_numbering() {
        let citations = vec![
            citation("c1", Some("p1"), Some("P1"), 0, Some(paper("Zimmer, A", 2020))),
            citation("c2", Some("p2"), Some("P1"), 1, Some(paper("Adams, B", 2019))),
        ];
        let entries = dedup_citations(&citations);
        let (ordered, numbers) =
            assign_numbers(&entries, NumberingPolicy::Alphabetical, &[]);
        assert_eq!(ordered[0].key, "p2");
        assert_eq!(numbers["p2"], 1);
        assert_eq!(numbers["p1"], 2);
    }

    #[test]
    fn test_appearance_numbering_follows_marker_position() {
        let paragraphs = vec![Paragraph::new(
            "P1",
            "See [cite:c1:p1] and [cite:c2:p2].",
        )];
        let citations = vec![
            // recorded out of order; the text decides
            citation("c2", Some("p2"), Some("P1"), 1, Some(paper("Adams, B", 2019))),
            citation("c1", Some("p1"), Some("P1"), 0, Some(paper("Zimmer, A", 2020))),
        ];
        let entries = dedup_citations(&citations);
        let (ordered, numbers) =
            assign_numbers(&entries, NumberingPolicy::Appearance, &paragraphs);
        assert_eq!(ordered[0].key, "p1");
        assert_eq!(numbers["p1"], 1);
        assert_eq!(numbers["p2"], 2);
    }

    #[test]
    fn test_appearance_same_paragraph_tie_break_by_offset() {
        let paragraphs = vec![Paragraph::new("P1", "First [cite:cA:pA] then [cite:cB:pB].")];
        let citations = vec![
            citation("cB", Some("pB"), Some("P1"), 0, Some(paper("Adams, B", 2019))),
            citation("cA", Some("pA"), Some("P1"), 1, Some(paper("Zimmer, A", 2020))),
        ];
        let entries = dedup_citations(&citations);
        let (_, numbers) = assign_numbers(&entries, NumberingPolicy::Appearance, &paragraphs);
        assert!(numbers["pA"] < numbers["pB"]);
    }

    #[test]
    fn test_appearance_unlocatable_markers_sort_last_by_citation_order() {
        let paragraphs = vec![Paragraph::new("P1", "Only [cite:c1:p1] is present.")];
        let citations = vec![
            citation("c2", Some("p2"), Some("P3"), 0, Some(paper("Adams, B", 2019))),
            citation("c3", Some("p3"), Some("P2"), 0, Some(paper("Baker, C", 2018))),
            citation("c1", Some("p1"), Some("P1"), 0, Some(paper("Zimmer, A", 2020))),
        ];
        let entries = dedup_citations(&citations);
        let (ordered, numbers) =
            assign_numbers(&entries, NumberingPolicy::Appearance, &paragraphs);
        assert_eq!(numbers["p1"], 1);
        // unplaced entries fall back to paragraph/citation order
        assert_eq!(ordered[1].key, "p3");
        assert_eq!(ordered[2].key, "p2");
    }

    #[test]
    fn test_appearance_degrades_to_alphabetical_without_metadata() {
        let citations = vec![
            citation("c1", Some("p1"), None, 0, Some(paper("Zimmer, A", 2020))),
            citation("c2", Some("p2"), None, 0, Some(paper("Adams, B", 2019))),
        ];
        let entries = dedup_citations(&citations);
        let (_, numbers) = assign_numbers(&entries, NumberingPolicy::Appearance, &[]);
        assert_eq!(numbers["p2"], 1);
        assert_eq!(numbers["p1"], 2);
    }

    #[test]
    fn test_numbering_uniqueness() {
        let citations = vec![
            citation("c1", Some("p1"), Some("P1"), 0, Some(paper("Zimmer, A", 2020))),
            citation("c2", Some("p1"), Some("P2"), 0, Some(paper("Zimmer, A", 2020))),
            citation("c3", Some("p2"), Some("P1"), 1, Some(paper("Adams, B", 2019))),
            citation("c4", Some("p3"), Some("P3"), 0, Some(paper("Chen, C", 2021))),
        ];
        let entries = dedup_citations(&citations);
        let (_, numbers) = assign_numbers(&entries, NumberingPolicy::Alphabetical, &[]);

        let distinct_papers: HashSet<&str> = citations
            .iter()
            .filter(|c| c.paper.is_some())
            .filter_map(|c| c.paper_id.as_deref())
            .collect();
        assert_eq!(numbers.len(), distinct_papers.len());

        let assigned: HashSet<usize> = numbers.values().copied().collect();
        assert_eq!(assigned.len(), numbers.len());
    }

    #[test]
    fn test_policy_for_mode() {
        assert_eq!(
            NumberingPolicy::for_mode(SortMode::CitationOrder),
            NumberingPolicy::Appearance
        );
        assert_eq!(
            NumberingPolicy::for_mode(SortMode::Alphabetical),
            NumberingPolicy::Alphabetical
        );
        assert_eq!(
            NumberingPolicy::for_mode(SortMode::YearThenAuthor),
            NumberingPolicy::Alphabetical
        );
    }

    #[test]
    fn test_bibliography_numbered_only_under_appearance() {
        let style = CitationStyle {
            id: "s".to_string(),
            name: "s".to_string(),
            display_name: "S".to_string(),
            sort: SortConfig::default(),
            author_rules: AuthorRules::default(),
            title: Default::default(),
            journal: Default::default(),
            volume: Default::default(),
            doi: Default::default(),
            year: Default::default(),
            template: "{authors} {journal} {year}".to_string(),
        };
        let paragraphs = vec![Paragraph::new("P1", "[cite:c1:p1] [cite:c2:p2]")];
        let citations = vec![
            citation("c1", Some("p1"), Some("P1"), 0, Some(paper("Zimmer, A", 2020))),
            citation("c2", Some("p2"), Some("P1"), 1, Some(paper("Adams, B", 2019))),
        ];
        let entries = dedup_citations(&citations);

        let (_, numbers) = assign_numbers(&entries, NumberingPolicy::Appearance, &paragraphs);
        let numbered = build_bibliography(
            &entries,
            &numbers,
            &style,
            NumberingPolicy::Appearance,
            OutputFormat::Plain,
        );
        assert!(numbered[0].starts_with("1. "));
        assert!(numbered[1].starts_with("2. "));

        let mut alpha_style = style.clone();
        alpha_style.sort.mode = SortMode::Alphabetical;
        let (_, numbers) = assign_numbers(&entries, NumberingPolicy::Alphabetical, &paragraphs);
        let unnumbered = build_bibliography(
            &entries,
            &numbers,
            &alpha_style,
            NumberingPolicy::Alphabetical,
            OutputFormat::Plain,
        );
        assert!(unnumbered[0].starts_with("Adams"));
        assert!(unnumbered[1].starts_with("Zimmer"));
    }
}
