//! Footer pieces shared by both pickers.

use crate::app::{App, HitTarget};
use crate::colors;
use bcall_core::navigator::Legend;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Buttons laid out left to right, each recorded as a hit area.
pub fn render_buttons(
    f: &mut Frame,
    area: Rect,
    buttons: &[(String, HitTarget)],
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let style = Style::default()
        .bg(colors::SURFACE_HIGH)
        .fg(colors::ON_SURFACE);

    let mut spans = Vec::with_capacity(buttons.len() * 2);
    let mut x = area.x;
    for (label, target) in buttons {
        let span = Span::styled(format!(" {label} "), style);
        let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
        let visible = width.min(area.right().saturating_sub(x));
        if visible > 0 {
            hits.push((Rect::new(x, area.y, visible, 1), *target));
        }
        x = x.saturating_add(width).saturating_add(1);
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_legends(f: &mut Frame, area: Rect, legends: &[Legend]) {
    let lines: Vec<Line> = legends
        .iter()
        .map(|legend| {
            Line::from(vec![
                Span::styled(
                    format!("{:<16}", legend.keys),
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(legend.description, Style::default().fg(colors::SUBTEXT)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Open-all progress, or the last notice.
pub fn render_notice(f: &mut Frame, area: Rect, app: &App) {
    let span = if app.overlay.is_visible() {
        Span::styled("Opening…", Style::default().fg(colors::WARNING))
    } else if let Some(notice) = &app.notice {
        Span::styled(notice.as_str(), Style::default().fg(colors::ERROR))
    } else {
        return;
    };
    f.render_widget(Paragraph::new(span), area);
}
