mod alphabet;
mod dirs;
mod settings;
mod validation;

pub use alphabet::{MAX_GLYPHS, MIN_GLYPHS, ShortcutAlphabet, validate_bindings};
pub use dirs::Directories;
pub use settings::{
    AppConfig, CallerConfig, Config, SearchBookmarksConfig, SortMode, StructureMode,
    VAULT_BOOKMARKS_FILE, is_hex_color,
};
pub use validation::warn_unknown_fields;
