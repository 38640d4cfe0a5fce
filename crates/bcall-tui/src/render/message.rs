//! Centered message view.

use crate::colors;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

// Terminal dimensions are u16, percentage calc uses f32
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_message(f: &mut Frame, title: &str, body: &str) {
    let size = f.area();

    let dialog_width = (f32::from(size.width) * 0.6).min(80.0) as u16;
    let dialog_width = dialog_width.max(40).min(size.width);
    let dialog_height = 7.min(size.height);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((size.width.saturating_sub(dialog_width)) / 2),
            Constraint::Length(dialog_width),
            Constraint::Min(0),
        ])
        .split(size);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((size.height.saturating_sub(dialog_height)) / 2),
            Constraint::Length(dialog_height),
            Constraint::Min(0),
        ])
        .split(horizontal[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::WARNING));

    let lines = vec![
        Line::from(Span::styled(body, Style::default().fg(colors::ON_SURFACE))),
        Line::from(""),
        Line::from(Span::styled(
            "Enter / Esc to close",
            Style::default()
                .fg(colors::OUTLINE)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, vertical[1]);
}
