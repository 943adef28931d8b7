//! Style import: raw JSON, a remote URL, or a structured form payload.
//!
//! All three input shapes funnel into the same `folio-styles` validator, so
//! an imported style is indistinguishable from a bundled one once it
//! resolves. This module is the only place in the engine that performs I/O:
//! the URL path issues one blocking fetch and propagates transport failures
//! as errors.

use crate::error::{Error, Result};
use folio_styles::{validate, CitationStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Content types rejected as CSL rather than parsed as JSON.
const CSL_CONTENT_TYPES: [&str; 3] = [
    "application/vnd.citationstyles.style+xml",
    "application/xml",
    "text/xml",
];

/// Import a style from raw JSON text.
pub fn import_json(text: &str) -> Result<CitationStyle> {
    Ok(validate::parse_style(text)?)
}

/// Import a style definition from a URL.
///
/// The response must be JSON; a CSL/XML content type is rejected explicitly
/// as not yet implemented rather than silently mis-parsed.
pub fn import_url(url: &str) -> Result<CitationStyle> {
    debug!(url, "fetching style definition");
    let response = reqwest::blocking::get(url).map_err(|e| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if CSL_CONTENT_TYPES
        .iter()
        .any(|csl| content_type.starts_with(csl))
    {
        return Err(Error::UnsupportedContentType { content_type });
    }

    let text = response.text().map_err(|e| Error::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    import_json(&text)
}

/// A structured form payload, as submitted from a style editor.
///
/// Only the required style fields are first-class here; formatting rule
/// groups fall back to their defaults, which is what a form-built style
/// wants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleForm {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub sort_mode: String,
    pub et_al_after: u32,
    pub delimiter: String,
    pub final_delimiter: String,
    pub template: String,
}

/// Import a style from a structured form payload.
///
/// The form is lowered to the JSON exchange shape and runs through the same
/// validator as every other import path.
pub fn import_form(form: &StyleForm) -> Result<CitationStyle> {
    let value = serde_json::json!({
        "id": form.id,
        "name": form.name,
        "displayName": form.display_name,
        "sort": { "mode": form.sort_mode },
        "authorRules": {
            "etAlAfter": form.et_al_after,
            "delimiter": form.delimiter,
            "finalDelimiter": form.final_delimiter,
        },
        "template": form.template,
    });
    Ok(validate::parse_style_value(value)?)
}
