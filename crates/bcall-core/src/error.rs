use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bookmarks unavailable: {}", .0.display())]
    BookmarksUnavailable(PathBuf),
}

/// Rejections raised where a setting is changed. The previous value stays in effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("4 to 10 characters are required.")]
    AlphabetLength { len: usize },

    #[error("Only printable ASCII characters can be used ({glyph:?} is not).")]
    InvalidGlyph { glyph: char },

    #[error("Can't assign duplicate characters and shortcut keys.")]
    Duplicate { key: String },

    #[error("The key can't be assigned because it's used preferentially by this plugin.")]
    ReservedKey { key: String },

    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    #[error("Unknown setting: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
