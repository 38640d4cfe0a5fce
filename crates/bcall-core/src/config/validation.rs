//! Config validation - warns about unknown fields

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Validate JSON config and warn about unknown fields.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return;
    };

    let expected = expected_config_keys();
    let unknowns = find_unknown_keys(&value, &expected, "");

    for path in unknowns {
        warn!("Unknown config field in {config_name}: {path}");
    }
}

/// Find unknown keys in JSON value compared to expected keys.
/// Returns paths like "caller.unknownField" for unknown fields.
fn find_unknown_keys(value: &Value, expected: &ExpectedKeys, prefix: &str) -> Vec<String> {
    let mut unknowns = Vec::new();

    let Value::Object(obj) = value else {
        return unknowns;
    };

    for (key, child) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if let Some(nested) = expected.nested.get(key.as_str()) {
            unknowns.extend(find_unknown_keys(child, nested, &path));
        } else if !expected.fields.contains(key.as_str()) {
            unknowns.push(path);
        }
    }

    unknowns
}

/// Expected keys for a config section.
/// `fields` are leaf fields, `nested` are nested objects with their own expected keys.
struct ExpectedKeys {
    fields: HashSet<&'static str>,
    nested: HashMap<&'static str, ExpectedKeys>,
}

impl ExpectedKeys {
    fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.iter().copied().collect(),
            nested: HashMap::new(),
        }
    }

    fn with_nested(mut self, key: &'static str, nested: ExpectedKeys) -> Self {
        self.nested.insert(key, nested);
        self
    }
}

const CALLER_KEYS: [&str; 11] = [
    "shortcutAlphabet",
    "characters",
    "openAllKey",
    "allBtn",
    "backKey",
    "backBtn",
    "recursiveOpenAll",
    "recursivelyOpen",
    "showFooterButtons",
    "showLegends",
    "focusColor",
];

const SEARCH_KEYS: [&str; 9] = [
    "structureMode",
    "structureType",
    "sortMode",
    "sortOrder",
    "recursiveOpenAll",
    "recursivelyOpen",
    "showFooterButtons",
    "showLegends",
    "focusColor",
];

fn caller_keys() -> ExpectedKeys {
    ExpectedKeys::new(&CALLER_KEYS)
}

fn search_keys() -> ExpectedKeys {
    ExpectedKeys::new(&SEARCH_KEYS)
}

/// Expected keys for `Config` (settings.rs), including legacy top-level caller fields
fn expected_config_keys() -> ExpectedKeys {
    let apps_keys = ExpectedKeys::new(&[
        "fileOpener",
        "fileManager",
        "browser",
        "webViewer",
        "allowExternalUrlsInApp",
        "searchCommand",
        "graphCommand",
    ]);

    let mut root = caller_keys()
        .with_nested("caller", caller_keys())
        .with_nested("openBookmarksCaller", caller_keys())
        .with_nested("search", search_keys())
        .with_nested("searchBookmarks", search_keys())
        .with_nested("apps", apps_keys);
    root.fields.extend(["vault", "bookmarksFile"]);
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknowns_of(json: &str) -> Vec<String> {
        let value: Value = serde_json::from_str(json).unwrap();
        find_unknown_keys(&value, &expected_config_keys(), "")
    }

    #[test]
    fn test_valid_config_no_warnings() {
        let unknowns = unknowns_of(
            r##"{
                "vault": "/home/me/notes",
                "caller": {"shortcutAlphabet": "asdf", "focusColor": "#ffffff"},
                "search": {"structureMode": "flat", "sortMode": "newer"},
                "apps": {"browser": "firefox"}
            }"##,
        );
        assert!(
            unknowns.is_empty(),
            "Expected no unknowns, got: {unknowns:?}"
        );
    }

    #[test]
    fn test_legacy_fields_are_known() {
        let unknowns = unknowns_of(r#"{"characters": "asdf", "allBtn": "/", "backBtn": "Backspace"}"#);
        assert!(unknowns.is_empty());
    }

    #[test]
    fn test_unknown_top_level_field() {
        let unknowns = unknowns_of(r#"{"caller": {}, "unknownSection": {}}"#);
        assert_eq!(unknowns, vec!["unknownSection"]);
    }

    #[test]
    fn test_unknown_nested_field() {
        let unknowns = unknowns_of(r#"{"search": {"sortMode": "older", "typoField": 1}}"#);
        assert_eq!(unknowns, vec!["search.typoField"]);
    }

    #[test]
    fn test_multiple_unknown_fields() {
        let unknowns = unknowns_of(
            r#"{"caller": {"typo1": 1}, "apps": {"typo2": 2}, "badSection": {}}"#,
        );
        assert!(unknowns.contains(&"caller.typo1".to_string()));
        assert!(unknowns.contains(&"apps.typo2".to_string()));
        assert!(unknowns.contains(&"badSection".to_string()));
    }

    #[test]
    fn test_warn_unknown_fields_does_not_panic_on_invalid_json() {
        warn_unknown_fields("not valid json", "test");
    }

    #[test]
    fn test_empty_config_no_warnings() {
        assert!(unknowns_of("{}").is_empty());
    }
}
