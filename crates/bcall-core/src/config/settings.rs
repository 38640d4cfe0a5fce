use super::alphabet::{ShortcutAlphabet, validate_bindings};
use crate::input::Key;
use crate::{ConfigError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Location of the bookmarks file relative to a vault root.
pub const VAULT_BOOKMARKS_FILE: &str = ".obsidian/bookmarks.json";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Vault root. File and folder bookmarks are resolved against it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    /// Explicit bookmarks file; defaults to `<vault>/.obsidian/bookmarks.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarks_file: Option<PathBuf>,

    pub caller: CallerConfig,

    pub search: SearchBookmarksConfig,

    pub apps: AppConfig,
}

/// Settings of the paged picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerConfig {
    shortcut_alphabet: ShortcutAlphabet,
    open_all_key: Key,
    back_key: Key,
    pub recursive_open_all: bool,
    pub show_footer_buttons: bool,
    pub show_legends: bool,
    pub focus_color: String,
}

/// Settings of the fuzzy picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBookmarksConfig {
    #[serde(default, alias = "structureType")]
    pub structure_mode: StructureMode,

    #[serde(default, alias = "sortOrder")]
    pub sort_mode: SortMode,

    #[serde(default = "default_true", alias = "recursivelyOpen")]
    pub recursive_open_all: bool,

    #[serde(default = "default_true")]
    pub show_footer_buttons: bool,

    #[serde(default = "default_true")]
    pub show_legends: bool,

    #[serde(default = "default_focus_color")]
    pub focus_color: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureMode {
    /// Groups are browsed layer by layer.
    Original,
    /// Groups and all their descendants are listed inline.
    #[default]
    Flat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Original,
    /// Newest creation time first.
    Newer,
    /// Oldest creation time first.
    Older,
}

/// External programs backing the desktop host. `None` means "use the platform default"
/// for openers, and "capability absent" for search, graph and web viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Command template for files; `{path}` and `{subpath}` are substituted.
    #[serde(default)]
    pub file_opener: Option<String>,

    #[serde(default)]
    pub file_manager: Option<String>,

    #[serde(default)]
    pub browser: Option<String>,

    /// In-app web viewer command, preferred for URLs when external URLs are allowed in it.
    #[serde(default)]
    pub web_viewer: Option<String>,

    #[serde(default)]
    pub allow_external_urls_in_app: bool,

    /// Command template for saved searches; `{query}` is substituted.
    #[serde(default)]
    pub search_command: Option<String>,

    /// Command template for scoped graph views; `{id}` is substituted.
    #[serde(default)]
    pub graph_command: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_focus_color() -> String {
    "#00b4e0".to_string()
}
fn default_open_all_key() -> Key {
    Key::Char('/')
}
fn default_back_key() -> Key {
    Key::Backspace
}

impl Default for CallerConfig {
    fn default() -> Self {
        Self {
            shortcut_alphabet: ShortcutAlphabet::default(),
            open_all_key: default_open_all_key(),
            back_key: default_back_key(),
            recursive_open_all: true,
            show_footer_buttons: true,
            show_legends: true,
            focus_color: default_focus_color(),
        }
    }
}

impl Default for SearchBookmarksConfig {
    fn default() -> Self {
        Self {
            structure_mode: StructureMode::default(),
            sort_mode: SortMode::default(),
            recursive_open_all: true,
            show_footer_buttons: true,
            show_legends: true,
            focus_color: default_focus_color(),
        }
    }
}

/// Caller settings as written on disk, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallerConfigRaw {
    #[serde(default, alias = "characters")]
    shortcut_alphabet: Option<String>,

    #[serde(default, alias = "allBtn")]
    open_all_key: Option<String>,

    #[serde(default, alias = "backBtn")]
    back_key: Option<String>,

    #[serde(default, alias = "recursivelyOpen")]
    recursive_open_all: Option<bool>,

    #[serde(default)]
    show_footer_buttons: Option<bool>,

    #[serde(default)]
    show_legends: Option<bool>,

    #[serde(default)]
    focus_color: Option<String>,
}

impl CallerConfigRaw {
    /// Move top-level settings written by older versions into the caller section.
    fn absorb_legacy(&mut self, legacy: CallerConfigRaw) {
        self.shortcut_alphabet = legacy.shortcut_alphabet.or(self.shortcut_alphabet.take());
        self.open_all_key = legacy.open_all_key.or(self.open_all_key.take());
        self.back_key = legacy.back_key.or(self.back_key.take());
        self.recursive_open_all = legacy.recursive_open_all.or(self.recursive_open_all);
        self.show_footer_buttons = legacy.show_footer_buttons.or(self.show_footer_buttons);
        self.show_legends = legacy.show_legends.or(self.show_legends);
        self.focus_color = legacy.focus_color.or(self.focus_color.take());
    }
}

impl From<CallerConfigRaw> for CallerConfig {
    /// Invalid bindings on disk fall back to the defaults with a warning.
    fn from(raw: CallerConfigRaw) -> Self {
        let mut config = CallerConfig::default();

        if let Some(value) = raw.recursive_open_all {
            config.recursive_open_all = value;
        }
        if let Some(value) = raw.show_footer_buttons {
            config.show_footer_buttons = value;
        }
        if let Some(value) = raw.show_legends {
            config.show_legends = value;
        }
        if let Some(color) = raw.focus_color {
            if is_hex_color(&color) {
                config.focus_color = color;
            } else {
                warn!("Ignoring invalid focusColor {color:?}");
            }
        }

        let alphabet = match raw.shortcut_alphabet.as_deref().map(ShortcutAlphabet::parse) {
            None => ShortcutAlphabet::default(),
            Some(Ok(alphabet)) => alphabet,
            Some(Err(e)) => {
                warn!("Ignoring invalid shortcutAlphabet: {e}");
                ShortcutAlphabet::default()
            }
        };
        let back_key = parse_key_or(raw.back_key.as_deref(), "backKey", default_back_key());
        let open_all_key =
            parse_key_or(raw.open_all_key.as_deref(), "openAllKey", default_open_all_key());

        match validate_bindings(&alphabet, back_key, open_all_key) {
            Ok(()) => {
                config.shortcut_alphabet = alphabet;
                config.back_key = back_key;
                config.open_all_key = open_all_key;
            }
            Err(e) => warn!("Ignoring conflicting key bindings, using defaults: {e}"),
        }

        config
    }
}

fn parse_key_or(value: Option<&str>, field: &str, fallback: Key) -> Key {
    match value.map(Key::parse) {
        None => fallback,
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            warn!("Ignoring invalid {field}: {e}");
            fallback
        }
    }
}

impl<'de> Deserialize<'de> for CallerConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        CallerConfigRaw::deserialize(deserializer).map(CallerConfig::from)
    }
}

/// Custom deserializer for `Config` that migrates top-level legacy caller settings
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ConfigRaw {
            #[serde(default)]
            vault: Option<PathBuf>,

            #[serde(default)]
            bookmarks_file: Option<PathBuf>,

            #[serde(default, alias = "openBookmarksCaller")]
            caller: Option<CallerConfigRaw>,

            #[serde(default, alias = "searchBookmarks")]
            search: SearchBookmarksConfig,

            #[serde(default)]
            apps: AppConfig,

            #[serde(flatten)]
            legacy: CallerConfigRaw,
        }

        let raw = ConfigRaw::deserialize(deserializer)?;

        let mut caller = raw.caller.unwrap_or_default();
        caller.absorb_legacy(raw.legacy);

        Ok(Self {
            vault: raw.vault,
            bookmarks_file: raw.bookmarks_file,
            caller: caller.into(),
            search: raw.search,
            apps: raw.apps,
        })
    }
}

impl CallerConfig {
    #[must_use]
    pub fn shortcut_alphabet(&self) -> &ShortcutAlphabet {
        &self.shortcut_alphabet
    }

    #[must_use]
    pub fn open_all_key(&self) -> Key {
        self.open_all_key
    }

    #[must_use]
    pub fn back_key(&self) -> Key {
        self.back_key
    }

    /// Replace the shortcut alphabet.
    ///
    /// # Errors
    ///
    /// Rejects invalid alphabets and alphabets that collide with the back or open-all key;
    /// the previous alphabet stays in effect.
    pub fn set_shortcut_alphabet(&mut self, value: &str) -> std::result::Result<(), ConfigError> {
        let alphabet = ShortcutAlphabet::parse(value)?;
        validate_bindings(&alphabet, self.back_key, self.open_all_key)?;
        self.shortcut_alphabet = alphabet;
        Ok(())
    }

    /// Rebind the back key.
    ///
    /// # Errors
    ///
    /// Rejects unknown, reserved or already bound keys; the previous key stays in effect.
    pub fn set_back_key(&mut self, value: &str) -> std::result::Result<(), ConfigError> {
        let key = Key::parse(value)?;
        validate_bindings(&self.shortcut_alphabet, key, self.open_all_key)?;
        self.back_key = key;
        Ok(())
    }

    /// Rebind the open-all key.
    ///
    /// # Errors
    ///
    /// Rejects unknown, reserved or already bound keys; the previous key stays in effect.
    pub fn set_open_all_key(&mut self, value: &str) -> std::result::Result<(), ConfigError> {
        let key = Key::parse(value)?;
        validate_bindings(&self.shortcut_alphabet, self.back_key, key)?;
        self.open_all_key = key;
        Ok(())
    }
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Bookmarks file to read, if one can be determined.
    #[must_use]
    pub fn bookmarks_path(&self) -> Option<PathBuf> {
        self.bookmarks_file
            .clone()
            .or_else(|| self.vault.as_ref().map(|v| v.join(VAULT_BOOKMARKS_FILE)))
    }

    /// Change a single setting addressed by its JSON path (e.g. `caller.backKey`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown fields or rejected values. Nothing is
    /// modified on error.
    pub fn set_field(&mut self, field: &str, value: &str) -> std::result::Result<(), ConfigError> {
        match field {
            "vault" => self.vault = Some(PathBuf::from(value)),
            "bookmarksFile" => self.bookmarks_file = Some(PathBuf::from(value)),

            "caller.shortcutAlphabet" | "caller.characters" => {
                self.caller.set_shortcut_alphabet(value)?;
            }
            "caller.backKey" => self.caller.set_back_key(value)?,
            "caller.openAllKey" => self.caller.set_open_all_key(value)?,
            "caller.recursiveOpenAll" => self.caller.recursive_open_all = parse_bool(field, value)?,
            "caller.showFooterButtons" => {
                self.caller.show_footer_buttons = parse_bool(field, value)?;
            }
            "caller.showLegends" => self.caller.show_legends = parse_bool(field, value)?,
            "caller.focusColor" => self.caller.focus_color = parse_color(field, value)?,

            "search.structureMode" => self.search.structure_mode = parse_enum(field, value)?,
            "search.sortMode" => self.search.sort_mode = parse_enum(field, value)?,
            "search.recursiveOpenAll" => self.search.recursive_open_all = parse_bool(field, value)?,
            "search.showFooterButtons" => {
                self.search.show_footer_buttons = parse_bool(field, value)?;
            }
            "search.showLegends" => self.search.show_legends = parse_bool(field, value)?,
            "search.focusColor" => self.search.focus_color = parse_color(field, value)?,

            "apps.fileOpener" => self.apps.file_opener = non_empty(value),
            "apps.fileManager" => self.apps.file_manager = non_empty(value),
            "apps.browser" => self.apps.browser = non_empty(value),
            "apps.webViewer" => self.apps.web_viewer = non_empty(value),
            "apps.searchCommand" => self.apps.search_command = non_empty(value),
            "apps.graphCommand" => self.apps.graph_command = non_empty(value),
            "apps.allowExternalUrlsInApp" => {
                self.apps.allow_external_urls_in_app = parse_bool(field, value)?;
            }

            _ => return Err(ConfigError::UnknownField(field.to_string())),
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(field: &str, value: &str) -> std::result::Result<bool, ConfigError> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(invalid(field, value)),
    }
}

fn parse_color(field: &str, value: &str) -> std::result::Result<String, ConfigError> {
    if is_hex_color(value) {
        Ok(value.to_string())
    } else {
        Err(invalid(field, value))
    }
}

fn parse_enum<T: serde::de::DeserializeOwned>(
    field: &str,
    value: &str,
) -> std::result::Result<T, ConfigError> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| invalid(field, value))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `#rrggbb`
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
