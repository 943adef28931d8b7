//! Style resolution: user overrides, the bundled catalog, hard fallback.
//!
//! Lookup order for a style id: a caller-registered user style, then the
//! bundled system catalog embedded with the crate, then a fixed fallback
//! style. Resolution never fails — an unknown id renders with the fallback.

use folio_styles::{validate, AuthorRules, CitationStyle, SortConfig};
use rust_embed::Embed;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Embedded system style catalog.
#[derive(Embed)]
#[folder = "styles/"]
#[include = "*.json"]
struct StyleAssets;

/// Summary of a catalog style, for style pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSummary {
    pub id: String,
    pub name: String,
    pub display_name: String,
}

/// Resolves style ids to [`CitationStyle`]s.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    /// User-scoped overrides, keyed by style id. Populated by the caller
    /// from whatever store it keeps imported styles in.
    user_styles: HashMap<String, CitationStyle>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user-scoped style. Typically the output of
    /// [`crate::import`]; takes precedence over the bundled catalog for
    /// the same id.
    pub fn register_user_style(&mut self, style: CitationStyle) {
        self.user_styles.insert(style.id.clone(), style);
    }

    /// Resolve a style id: user override → bundled catalog → fallback.
    pub fn resolve(&self, id: &str) -> CitationStyle {
        if let Some(style) = self.user_styles.get(id) {
            debug!(style = id, "resolved user style");
            return style.clone();
        }
        if let Some(style) = load_bundled(id) {
            debug!(style = id, "resolved bundled style");
            return style;
        }
        warn!(style = id, "style not found, using fallback");
        fallback_style()
    }

    /// List the bundled system catalog. User styles are not included; the
    /// caller already knows what it registered.
    pub fn available_styles(&self) -> Vec<StyleSummary> {
        let mut styles: Vec<StyleSummary> = StyleAssets::iter()
            .filter_map(|path| {
                let id = path.strip_suffix(".json")?.to_string();
                let style = load_bundled(&id)?;
                Some(StyleSummary {
                    id: style.id,
                    name: style.name,
                    display_name: style.display_name,
                })
            })
            .collect();
        styles.sort_by(|a, b| a.id.cmp(&b.id));
        styles
    }
}

/// Load and validate one bundled style by id.
fn load_bundled(id: &str) -> Option<CitationStyle> {
    let file = StyleAssets::get(&format!("{id}.json"))?;
    let text = std::str::from_utf8(file.data.as_ref()).ok()?;
    match validate::parse_style(text) {
        Ok(style) => Some(style),
        Err(error) => {
            // A bundled style that fails its own validation is a packaging
            // bug; skip it rather than poison resolution.
            warn!(style = id, %error, "bundled style failed validation");
            None
        }
    }
}

/// The hard fallback style used when an id matches nothing: a plain
/// numeric, citation-ordered style.
pub fn fallback_style() -> CitationStyle {
    CitationStyle {
        id: "fallback".to_string(),
        name: "fallback".to_string(),
        display_name: "Default (numeric)".to_string(),
        sort: SortConfig::default(),
        author_rules: AuthorRules {
            et_al_after: 3,
            ..Default::default()
        },
        title: Default::default(),
        journal: Default::default(),
        volume: Default::default(),
        doi: Default::default(),
        year: Default::default(),
        template: "{authors} {title} {journal} {volume}, {pages} ({year}). {doi}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_styles::SortMode;

    #[test]
    fn test_bundled_styles_resolve() {
        let registry = StyleRegistry::new();

        let nature = registry.resolve("nature");
        assert_eq!(nature.id, "nature");
        assert_eq!(nature.sort.mode, SortMode::CitationOrder);

        let apa = registry.resolve("apa");
        assert_eq!(apa.id, "apa");
        assert_eq!(apa.sort.mode, SortMode::Alphabetical);
    }

    #[test]
    fn test_unknown_id_resolves_to_fallback() {
        let registry = StyleRegistry::new();
        let style = registry.resolve("no-such-style");
        assert_eq!(style.id, "fallback");
        assert_eq!(style.sort.mode, SortMode::CitationOrder);
    }

    #[test]
    fn test_user_style_takes_precedence() {
        let mut registry = StyleRegistry::new();
        let mut custom = fallback_style();
        custom.id = "nature".to_string();
        custom.display_name = "My Nature".to_string();
        registry.register_user_style(custom);

        assert_eq!(registry.resolve("nature").display_name, "My Nature");
    }

    #[test]
    fn test_available_styles_lists_catalog() {
        let registry = StyleRegistry::new();
        let styles = registry.available_styles();
        let ids: Vec<&str> = styles.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["apa", "harvard", "ieee", "nature", "vancouver"]);
        assert!(styles.iter().all(|s| !s.display_name.is_empty()));
    }

    #[test]
    fn test_available_styles_excludes_user_styles() {
        let mut registry = StyleRegistry::new();
        let mut custom = fallback_style();
        custom.id = "my-style".to_string();
        registry.register_user_style(custom);

        let ids: Vec<String> = registry
            .available_styles()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert!(!ids.contains(&"my-style".to_string()));
    }

    #[test]
    fn test_fallback_style_passes_validation() {
        let json = serde_json::to_value(fallback_style()).unwrap();
        validate::validate_style_value(&json).unwrap();
    }
}
