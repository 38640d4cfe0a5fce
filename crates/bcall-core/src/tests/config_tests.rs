//! Tests for configuration at the boundaries where it is set
//!
//! Tests the config system including:
//! - Rejected changes leaving the previous value in effect
//! - Files written by older versions
//! - Save/load round trips
//! - Directories management

use crate::config::{CallerConfig, Config, Directories, SortMode, StructureMode};
use crate::input::Key;
use crate::ConfigError;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_duplicate_glyph_keeps_prior_alphabet() {
    let mut caller = CallerConfig::default();
    caller.set_shortcut_alphabet("qwer").unwrap();

    let err = caller.set_shortcut_alphabet("aabc").unwrap_err();

    assert_eq!(err, ConfigError::Duplicate { key: "a".into() });
    assert_eq!(caller.shortcut_alphabet().to_string(), "qwer");
}

#[test]
fn test_alphabet_colliding_with_open_all_key() {
    let mut caller = CallerConfig::default();

    let err = caller.set_shortcut_alphabet("asd/").unwrap_err();

    assert!(matches!(err, ConfigError::Duplicate { .. }));
    assert_eq!(caller.shortcut_alphabet().to_string(), "asdfghjkl;");
}

#[test]
fn test_reserved_back_key_rejected() {
    let mut caller = CallerConfig::default();

    let err = caller.set_back_key("ArrowLeft").unwrap_err();

    assert_eq!(
        err.to_string(),
        "The key can't be assigned because it's used preferentially by this plugin."
    );
    assert_eq!(caller.back_key(), Key::Backspace);
}

#[test]
fn test_set_field_rejection_leaves_config_untouched() {
    let mut config = Config::default();
    let before = config.caller.clone();

    assert!(config.set_field("caller.shortcutAlphabet", "abc").is_err());
    assert!(config.set_field("caller.openAllKey", "a").is_err());
    assert!(config.set_field("caller.focusColor", "blue").is_err());

    assert_eq!(config.caller, before);
}

#[test]
fn test_legacy_file_is_migrated() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        r##"{
            "characters": "hjkl",
            "allBtn": "*",
            "backBtn": "Delete",
            "recursivelyOpen": false,
            "searchBookmarks": {"structureType": "original", "sortOrder": "older"}
        }"##,
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.caller.shortcut_alphabet().to_string(), "hjkl");
    assert_eq!(config.caller.open_all_key(), Key::Char('*'));
    assert_eq!(config.caller.back_key(), Key::Delete);
    assert!(!config.caller.recursive_open_all);
    assert_eq!(config.search.structure_mode, StructureMode::Original);
    assert_eq!(config.search.sort_mode, SortMode::Older);
}

#[test]
fn test_invalid_alphabet_on_disk_falls_back() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r#"{"caller": {"shortcutAlphabet": "aa"}}"#).unwrap();

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.caller.shortcut_alphabet().to_string(), "asdfghjkl;");
}

#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_field("vault", "/home/me/notes").unwrap();
    config.set_field("caller.shortcutAlphabet", "qwerty").unwrap();
    config.set_field("search.sortMode", "newer").unwrap();
    config.set_field("apps.browser", "firefox").unwrap();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.caller, config.caller);
    assert_eq!(loaded.search, config.search);
    assert_eq!(loaded.apps, config.apps);
    assert_eq!(
        loaded.bookmarks_path().unwrap(),
        std::path::PathBuf::from("/home/me/notes/.obsidian/bookmarks.json")
    );
}

#[test]
fn test_directories_ensure_exists() {
    let dir = TempDir::new().unwrap();
    let dirs = Directories::with_base(dir.path().join("bcall"));

    dirs.ensure_exists().unwrap();

    assert!(dirs.config.exists());
    assert!(dirs.data.exists());
    assert_eq!(dirs.config_file, dirs.config.join("config.json"));
}
