//! Rendering functions for the TUI.
//!
//! Both pickers share one vertical layout: header, rows, notice line, footer
//! buttons and legends. Rendering records clickable areas into [`App::hits`].

mod caller;
mod footer;
mod message;
mod search;

pub use caller::render_caller;
pub use footer::{render_buttons, render_legends, render_notice};
pub use message::render_message;
pub use search::{highlight_spans, render_search};

use crate::app::{App, HitTarget, Picker, Screen, ViewOptions};
use crate::colors;
use bcall_core::display::Icon;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};

/// Terminal glyph for an icon.
pub fn icon_glyph(icon: &Icon) -> &'static str {
    match icon {
        Icon::Expand => "▸",
        Icon::FolderClosed => "▭",
        Icon::Block => "▪",
        Icon::Heading => "#",
        Icon::File => "≡",
        Icon::Search => "⌕",
        Icon::Graph => "⑂",
        Icon::Globe | Icon::Favicon(_) => "◍",
        Icon::Blank => " ",
    }
}

pub(crate) struct Areas {
    pub header: Rect,
    pub body: Rect,
    pub notice: Rect,
    pub buttons: Option<Rect>,
    pub legends: Option<Rect>,
}

// Legend count is a handful of lines
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn split(area: Rect, view: &ViewOptions, legend_count: usize) -> Areas {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ];
    if view.show_footer_buttons {
        constraints.push(Constraint::Length(1));
    }
    if view.show_legends {
        constraints.push(Constraint::Length(legend_count as u16 + 2));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);

    let mut next = 3;
    let mut take = |enabled: bool| {
        enabled.then(|| {
            next += 1;
            chunks[next - 1]
        })
    };
    let buttons = take(view.show_footer_buttons);
    let legends = take(view.show_legends);

    Areas {
        header: chunks[0],
        body: chunks[1],
        notice: chunks[2],
        buttons,
        legends,
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(colors::BG));
    f.render_widget(bg_block, f.area());

    let mut hits: Vec<(Rect, HitTarget)> = Vec::new();
    match &app.screen {
        Screen::Picker(Picker::Caller(nav)) => render_caller(f, nav, app, &mut hits),
        Screen::Picker(Picker::Search(nav)) => render_search(f, nav, app, &mut hits),
        Screen::Message { title, body } => render_message(f, title, body),
    }
    app.hits = hits;
}
