//! Translation from crossterm key events to navigator input.

use bcall_core::input::{Key, KeyInput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Ctrl+C always closes the picker, whatever the navigator binds.
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c')
}

/// `None` for keys the navigators never see (function keys, Ctrl/Alt chords).
pub fn to_key_input(event: &KeyEvent) -> Option<KeyInput> {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    let shift = event.modifiers.contains(KeyModifiers::SHIFT);
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => return Some(KeyInput::shifted(Key::Tab)),
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(KeyInput { key, shift })
}
