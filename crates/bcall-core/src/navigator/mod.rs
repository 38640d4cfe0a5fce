//! Keyboard-first browsing over a bookmark tree.
//!
//! Navigators own all per-session state and render nothing. Front ends read
//! what is visible through accessors and feed key presses or clicks back in.

mod fuzzy;
mod layers;
mod paged;

pub use fuzzy::{FuzzyNavigator, FuzzyOutcome, FuzzyRow, FuzzySettings, flatten, prepare_layer};
pub use layers::LayerStack;
pub use paged::{HistoryEntry, PagedNavigator, ViewSlot};

/// Result of an input event handled by the paged navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Keep the picker open.
    Stay,
    /// Something was opened; close the picker.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Left,
    Right,
}

/// One line of the footer legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    pub keys: String,
    pub description: &'static str,
}

impl Legend {
    fn new(keys: impl Into<String>, description: &'static str) -> Self {
        Self {
            keys: keys.into(),
            description,
        }
    }
}

/// Next index when stepping through `len` entries with wrap-around.
pub(crate) fn wrap_step(current: usize, len: usize, direction: FocusDirection) -> usize {
    if len == 0 {
        return 0;
    }
    match direction {
        FocusDirection::Up if current == 0 => len - 1,
        FocusDirection::Up => (current - 1).min(len - 1),
        FocusDirection::Down if current + 1 >= len => 0,
        FocusDirection::Down => current + 1,
    }
}
