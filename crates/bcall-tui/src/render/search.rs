//! Fuzzy picker: query line over scored matches.

use super::{icon_glyph, render_buttons, render_legends, render_notice, split};
use crate::app::{App, HitTarget};
use crate::colors;
use bcall_core::FuzzyNavigator;
use bcall_core::display::type_icon;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::ops::Range;

/// Split `name` into spans, styling the char ranges in `highlights`.
pub fn highlight_spans(
    name: &str,
    highlights: &[Range<usize>],
    base: Style,
    highlight: Style,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_hl = false;

    for (i, c) in name.chars().enumerate() {
        let hl = highlights.iter().any(|r| r.contains(&i));
        if hl != current_hl && !current.is_empty() {
            let style = if current_hl { highlight } else { base };
            spans.push(Span::styled(std::mem::take(&mut current), style));
        }
        current_hl = hl;
        current.push(c);
    }
    if !current.is_empty() {
        let style = if current_hl { highlight } else { base };
        spans.push(Span::styled(current, style));
    }
    spans
}

pub fn render_search(
    f: &mut Frame,
    nav: &FuzzyNavigator,
    app: &App,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let legends = FuzzyNavigator::legends();
    let areas = split(f.area(), &app.view, legends.len());

    let title = if nav.can_go_back() {
        format!(" Search bookmarks {} ", ".".repeat(nav.layers().depth() - 1))
    } else {
        " Search bookmarks ".to_string()
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::PRIMARY));
    let input_text = if nav.query().is_empty() {
        Span::styled("Type to search...", Style::default().fg(colors::OUTLINE))
    } else {
        Span::styled(nav.query(), Style::default().fg(colors::ON_SURFACE))
    };
    f.render_widget(Paragraph::new(input_text).block(input_block), areas.header);

    let cursor = u16::try_from(nav.query().chars().count()).unwrap_or(u16::MAX);
    f.set_cursor_position((
        areas.header.x.saturating_add(cursor).saturating_add(1),
        areas.header.y + 1,
    ));

    let results_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", nav.matches().len()))
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));
    let inner = results_block.inner(areas.body);
    f.render_widget(results_block, areas.body);

    let height = usize::from(inner.height);
    let scroll = (nav.selected() + 1).saturating_sub(height);
    let base = Style::default().fg(colors::ON_SURFACE);
    let highlight = Style::default()
        .fg(colors::PRIMARY)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    for (offset, (row_index, row)) in nav
        .matches()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .enumerate()
    {
        let Ok(offset) = u16::try_from(offset) else { break };
        let area = Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let item = nav.item(row);
        let selected = row_index == nav.selected();

        let mut spans = vec![
            Span::raw(" "),
            Span::raw(icon_glyph(&type_icon(item))),
            Span::raw(" "),
        ];
        spans.extend(highlight_spans(nav.name(row), &row.highlights, base, highlight));

        let row_style = if selected {
            Style::default()
                .bg(app.view.focus)
                .fg(colors::BG)
                .add_modifier(Modifier::BOLD)
        } else if nav.service().is_activatable(item) {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        f.render_widget(Paragraph::new(Line::from(spans)).style(row_style), area);
        hits.push((area, HitTarget::Row(row_index)));
    }

    render_notice(f, areas.notice, app);

    if let Some(area) = areas.buttons {
        let mut buttons = Vec::new();
        if nav.can_go_back() {
            buttons.push(("← Back".to_string(), HitTarget::Back));
        }
        if !nav.items().is_empty() {
            buttons.push(("Open all".to_string(), HitTarget::OpenAll));
        }
        render_buttons(f, area, &buttons, hits);
    }

    if let Some(area) = areas.legends {
        render_legends(f, area, &legends);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[Span<'_>]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_spans_split_on_ranges() {
        let base = Style::default();
        let hl = Style::default().add_modifier(Modifier::BOLD);

        let spans = highlight_spans("Projects", &[0..1, 3..5], base, hl);

        assert_eq!(texts(&spans), vec!["P", "ro", "je", "cts"]);
        assert_eq!(spans[0].style, hl);
        assert_eq!(spans[1].style, base);
    }

    #[test]
    fn test_highlight_spans_multibyte() {
        let spans = highlight_spans(
            "Café au lait",
            &[2..4],
            Style::default(),
            Style::default().add_modifier(Modifier::BOLD),
        );
        assert_eq!(texts(&spans), vec!["Ca", "fé", " au lait"]);
    }

    #[test]
    fn test_highlight_spans_without_ranges() {
        let spans = highlight_spans("Inbox", &[], Style::default(), Style::default());
        assert_eq!(texts(&spans), vec!["Inbox"]);
    }
}
