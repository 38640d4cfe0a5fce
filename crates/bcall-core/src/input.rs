//! Keyboard input as seen by the navigators.
//!
//! Front ends translate their native key events into [`KeyInput`]; key names
//! follow the host's `KeyboardEvent.key` spelling so config files stay portable.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
}

/// Keys the navigators always handle themselves; they can never be rebound.
pub const RESERVED_KEYS: [Key; 6] = [
    Key::Up,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Char(' '),
    Key::Enter,
];

impl Key {
    /// Parse a key name (`"Backspace"`, `"ArrowUp"`, `"/"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for empty input or unknown multi-character names.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }
        match name {
            "ArrowUp" => Ok(Key::Up),
            "ArrowDown" => Ok(Key::Down),
            "ArrowLeft" => Ok(Key::Left),
            "ArrowRight" => Ok(Key::Right),
            "Enter" => Ok(Key::Enter),
            "Backspace" => Ok(Key::Backspace),
            "Delete" => Ok(Key::Delete),
            "Tab" => Ok(Key::Tab),
            "Escape" => Ok(Key::Escape),
            "Space" => Ok(Key::Char(' ')),
            _ => Err(ConfigError::UnknownKey(name.to_string())),
        }
    }

    #[must_use]
    pub fn is_reserved(self) -> bool {
        RESERVED_KEYS.contains(&self)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Up => f.write_str("ArrowUp"),
            Key::Down => f.write_str("ArrowDown"),
            Key::Left => f.write_str("ArrowLeft"),
            Key::Right => f.write_str("ArrowRight"),
            Key::Enter => f.write_str("Enter"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Tab => f.write_str("Tab"),
            Key::Escape => f.write_str("Escape"),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::parse(&value)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// A key press with the one modifier the navigators care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    #[must_use]
    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }

    #[must_use]
    pub fn char(c: char) -> Self {
        Self::plain(Key::Char(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_char() {
        assert_eq!(Key::parse("/").unwrap(), Key::Char('/'));
        assert_eq!(Key::parse(";").unwrap(), Key::Char(';'));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Key::parse("Backspace").unwrap(), Key::Backspace);
        assert_eq!(Key::parse("ArrowLeft").unwrap(), Key::Left);
        assert_eq!(Key::parse("Space").unwrap(), Key::Char(' '));
        assert_eq!(Key::parse(" ").unwrap(), Key::Char(' '));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(Key::parse("Hyper"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(Key::parse(""), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_display_uses_host_names() {
        assert_eq!(Key::Up.to_string(), "ArrowUp");
        assert_eq!(Key::Backspace.to_string(), "Backspace");
        assert_eq!(Key::Char('k').to_string(), "k");
    }

    #[test]
    fn test_reserved() {
        assert!(Key::Enter.is_reserved());
        assert!(Key::Char(' ').is_reserved());
        assert!(Key::Right.is_reserved());
        assert!(!Key::Backspace.is_reserved());
        assert!(!Key::Char('/').is_reserved());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Key::Backspace).unwrap();
        assert_eq!(json, "\"Backspace\"");
        let key: Key = serde_json::from_str("\"ArrowDown\"").unwrap();
        assert_eq!(key, Key::Down);
        assert!(serde_json::from_str::<Key>("\"NotAKey\"").is_err());
    }
}
