//! Material Design 3 dark theme colors

use ratatui::style::Color;

pub const BG: Color = Color::Rgb(0x14, 0x13, 0x13);
pub const SURFACE: Color = Color::Rgb(0x20, 0x1f, 0x20);
pub const SURFACE_HIGH: Color = Color::Rgb(0x2b, 0x2a, 0x2a);

pub const ON_SURFACE: Color = Color::Rgb(0xe6, 0xe1, 0xe1);
pub const SUBTEXT: Color = Color::Rgb(0xcb, 0xc5, 0xca);
pub const OUTLINE: Color = Color::Rgb(0x94, 0x8f, 0x94);

pub const PRIMARY: Color = Color::Rgb(0xcb, 0xc4, 0xcb);

pub const ERROR: Color = Color::Rgb(0xff, 0xb4, 0xab);

pub const WARNING: Color = Color::Rgb(0xff, 0xd9, 0x66);

/// Fallback for a `focusColor` that is not `#rrggbb`.
pub const FOCUS: Color = Color::Rgb(0x00, 0xb4, 0xe0);

/// Parse a `#rrggbb` string.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn focus_color(value: &str) -> Color {
    parse_hex(value).unwrap_or(FOCUS)
}
