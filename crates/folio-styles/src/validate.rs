//! Style definition validation.
//!
//! Every import path (raw JSON, URL fetch, structured form) funnels through
//! the same checks here: required top-level fields, a sort config with a
//! mode, and the template placeholders the renderer depends on. Validation
//! runs against the raw JSON value before deserialization so errors can
//! name the exact missing requirement instead of surfacing a generic
//! deserialization failure.

use crate::error::{Error, Result};
use crate::types::CitationStyle;
use serde_json::Value;

/// Placeholders every template must contain.
pub const REQUIRED_PLACEHOLDERS: [&str; 3] = ["{authors}", "{journal}", "{year}"];

/// Required top-level string fields.
const REQUIRED_STRING_FIELDS: [&str; 3] = ["id", "name", "displayName"];

/// Parse and validate a style definition from JSON text.
pub fn parse_style(json: &str) -> Result<CitationStyle> {
    let value: Value = serde_json::from_str(json)?;
    parse_style_value(value)
}

/// Validate a style definition value and deserialize it.
pub fn parse_style_value(value: Value) -> Result<CitationStyle> {
    validate_style_value(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Check a raw JSON value against the style definition requirements.
///
/// Returns the first violation found, in a fixed order (identity fields,
/// sort config, author rules, template, placeholders) so error messages are
/// deterministic for a given definition.
pub fn validate_style_value(value: &Value) -> Result<()> {
    let obj = value.as_object().ok_or(Error::NotAnObject)?;

    for field in REQUIRED_STRING_FIELDS {
        let present = obj
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !present {
            return Err(Error::MissingField {
                field: field.to_string(),
            });
        }
    }

    let sort = obj.get("sort").ok_or_else(|| Error::MissingField {
        field: "sort".to_string(),
    })?;
    if sort.get("mode").and_then(Value::as_str).is_none() {
        return Err(Error::MissingField {
            field: "sort.mode".to_string(),
        });
    }

    match obj.get("authorRules") {
        None => {
            return Err(Error::MissingField {
                field: "authorRules".to_string(),
            });
        }
        Some(rules) if !rules.is_object() => {
            return Err(Error::InvalidField {
                field: "authorRules".to_string(),
                message: "expected an object".to_string(),
            });
        }
        Some(_) => {}
    }

    let template = obj
        .get("template")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::MissingField {
            field: "template".to_string(),
        })?;

    for placeholder in REQUIRED_PLACEHOLDERS {
        if !template.contains(placeholder) {
            return Err(Error::MissingPlaceholder {
                placeholder: placeholder.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortMode;

    fn valid_style_json() -> serde_json::Value {
        serde_json::json!({
            "id": "test",
            "name": "test",
            "displayName": "Test Style",
            "sort": {"mode": "alphabetical"},
            "authorRules": {"etAlAfter": 3},
            "template": "{authors} {title} {journal} {volume}, {pages} ({year}) {doi}"
        })
    }

    #[test]
    fn test_valid_style_parses() {
        let style = parse_style(&valid_style_json().to_string()).unwrap();
        assert_eq!(style.id, "test");
        assert_eq!(style.sort.mode, SortMode::Alphabetical);
        assert_eq!(style.author_rules.et_al_after, 3);
    }

    #[test]
    fn test_missing_year_placeholder_is_named() {
        let mut json = valid_style_json();
        json["template"] = "{authors} {title} {journal}".into();

        let err = parse_style(&json.to_string()).unwrap_err();
        match err {
            Error::MissingPlaceholder { placeholder } => assert_eq!(placeholder, "{year}"),
            other => panic!("expected MissingPlaceholder, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_author_rules_is_named() {
        let mut json = valid_style_json();
        json.as_object_mut().unwrap().remove("authorRules");

        let err = parse_style(&json.to_string()).unwrap_err();
        match err {
            Error::MissingField { field } => assert_eq!(field, "authorRules"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_sort_mode_is_named() {
        let mut json = valid_style_json();
        json["sort"] = serde_json::json!({});

        let err = parse_style(&json.to_string()).unwrap_err();
        match err {
            Error::MissingField { field } => assert_eq!(field, "sort.mode"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_display_name_counts_as_missing() {
        let mut json = valid_style_json();
        json["displayName"] = "  ".into();

        let err = parse_style(&json.to_string()).unwrap_err();
        match err {
            Error::MissingField { field } => assert_eq!(field, "displayName"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_rejected() {
        let err = parse_style("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, Error::NotAnObject));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = parse_style("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
