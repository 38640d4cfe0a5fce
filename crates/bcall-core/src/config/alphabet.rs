//! Shortcut alphabet and key-binding validation.

use crate::ConfigError;
use crate::input::Key;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_GLYPHS: usize = 4;
pub const MAX_GLYPHS: usize = 10;

const DEFAULT_ALPHABET: &str = "asdfghjkl;";

/// Ordered, distinct glyphs bound positionally to the rows of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortcutAlphabet(Vec<char>);

impl ShortcutAlphabet {
    /// Parse and validate an alphabet: 4-10 printable non-space ASCII glyphs, no repeats.
    ///
    /// # Errors
    ///
    /// Returns the first rule the value violates.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let glyphs: Vec<char> = value.chars().collect();

        if !(MIN_GLYPHS..=MAX_GLYPHS).contains(&glyphs.len()) {
            return Err(ConfigError::AlphabetLength { len: glyphs.len() });
        }

        if let Some(&glyph) = glyphs.iter().find(|c| !c.is_ascii_graphic()) {
            return Err(ConfigError::InvalidGlyph { glyph });
        }

        if let Some(dup) = first_duplicate(glyphs.iter().copied().map(Key::Char)) {
            return Err(ConfigError::Duplicate {
                key: dup.to_string(),
            });
        }

        Ok(Self(glyphs))
    }

    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.0
    }

    /// Page size of a navigator using this alphabet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated alphabet; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn glyph(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }

    #[must_use]
    pub fn index_of(&self, glyph: char) -> Option<usize> {
        self.0.iter().position(|&c| c == glyph)
    }

    #[must_use]
    pub fn contains(&self, glyph: char) -> bool {
        self.0.contains(&glyph)
    }

    /// Compressed legend such as `a | s | ... | l | ;`.
    #[must_use]
    pub fn legend(&self) -> String {
        let head: Vec<String> = self.0.iter().take(2).map(char::to_string).collect();
        let tail: Vec<String> = self.0[self.0.len().saturating_sub(2)..]
            .iter()
            .map(char::to_string)
            .collect();
        format!("{} | ... | {}", head.join(" | "), tail.join(" | "))
    }
}

impl Default for ShortcutAlphabet {
    fn default() -> Self {
        Self(DEFAULT_ALPHABET.chars().collect())
    }
}

impl fmt::Display for ShortcutAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for ShortcutAlphabet {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShortcutAlphabet> for String {
    fn from(alphabet: ShortcutAlphabet) -> Self {
        alphabet.to_string()
    }
}

/// Check that alphabet, back key and open-all key never shadow each other or a reserved key.
///
/// # Errors
///
/// [`ConfigError::Duplicate`] when two bindings share a key, [`ConfigError::ReservedKey`]
/// when the back or open-all key is one the navigator always handles itself.
pub fn validate_bindings(
    alphabet: &ShortcutAlphabet,
    back_key: Key,
    open_all_key: Key,
) -> Result<(), ConfigError> {
    let keys = alphabet
        .glyphs()
        .iter()
        .copied()
        .map(Key::Char)
        .chain([back_key, open_all_key]);

    if let Some(dup) = first_duplicate(keys) {
        return Err(ConfigError::Duplicate {
            key: dup.to_string(),
        });
    }

    for key in [back_key, open_all_key] {
        if key.is_reserved() {
            return Err(ConfigError::ReservedKey {
                key: key.to_string(),
            });
        }
    }

    Ok(())
}

fn first_duplicate(mut keys: impl Iterator<Item = Key>) -> Option<Key> {
    let mut seen = std::collections::HashSet::new();
    keys.find(|key| !seen.insert(*key))
}
