//! Paged picker: shortcut rows under the current breadcrumb.

use super::{icon_glyph, render_buttons, render_legends, render_notice, split};
use crate::app::{App, HitTarget};
use crate::colors;
use bcall_core::display::{display_name, type_icon};
use bcall_core::navigator::ViewSlot;
use bcall_core::{Capabilities, PagedNavigator};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render_caller(
    f: &mut Frame,
    nav: &PagedNavigator,
    app: &App,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let legends = nav.legends();
    let areas = split(f.area(), &app.view, legends.len());

    let mut header = vec![Span::styled(
        nav.breadcrumb(),
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    )];
    if nav.shows_pagination() {
        header.push(Span::styled(
            format!("  {}/{}", nav.page() + 1, nav.page_count()),
            Style::default().fg(colors::SUBTEXT),
        ));
    }
    let header_block = Block::default()
        .borders(Borders::ALL)
        .title(" bcall ")
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));
    f.render_widget(Paragraph::new(Line::from(header)).block(header_block), areas.header);

    let body_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Bookmarks ({}) ", nav.layer().len()))
        .style(Style::default().bg(colors::SURFACE))
        .border_style(Style::default().fg(colors::OUTLINE));
    let inner = body_block.inner(areas.body);
    f.render_widget(body_block, areas.body);

    let slots = nav.view_slots();
    if slots.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No bookmarks in this group",
                Style::default().fg(colors::OUTLINE),
            )),
            inner,
        );
    }

    let caps = nav.service().capabilities();
    for (i, slot) in slots.iter().enumerate() {
        let Ok(offset) = u16::try_from(i) else { break };
        if offset >= inner.height {
            break;
        }
        let area = Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let (line, style) = slot_line(slot, caps, app.view.focus);
        f.render_widget(Paragraph::new(line).style(style), area);
        if slot.item.is_some() {
            hits.push((area, HitTarget::Row(i)));
        }
    }

    render_notice(f, areas.notice, app);

    if let Some(area) = areas.buttons {
        let mut buttons = Vec::new();
        if nav.can_go_back() {
            buttons.push(("← Back".to_string(), HitTarget::Back));
        }
        if nav.shows_open_all() {
            buttons.push(("Open all".to_string(), HitTarget::OpenAll));
        }
        if nav.shows_pagination() {
            buttons.push(("‹".to_string(), HitTarget::PrevPage));
            buttons.push(("›".to_string(), HitTarget::NextPage));
        }
        render_buttons(f, area, &buttons, hits);
    }

    if let Some(area) = areas.legends {
        render_legends(f, area, &legends);
    }
}

/// Row text and the style filling the whole row.
fn slot_line(slot: &ViewSlot<'_>, caps: &Capabilities, focus: Color) -> (Line<'static>, Style) {
    let Some(item) = slot.item else {
        let glyph = Span::styled(
            format!(" {} ", slot.glyph),
            Style::default().fg(colors::OUTLINE),
        );
        return (Line::from(glyph), Style::default());
    };

    let row_style = if slot.focused {
        Style::default()
            .bg(focus)
            .fg(colors::BG)
            .add_modifier(Modifier::BOLD)
    } else if slot.read_only {
        Style::default()
            .fg(colors::OUTLINE)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(colors::ON_SURFACE)
    };
    let glyph_style = if slot.focused {
        row_style
    } else {
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", slot.glyph), glyph_style),
        Span::raw(" "),
        Span::raw(icon_glyph(&type_icon(item))),
        Span::raw(" "),
        Span::raw(display_name(item, caps)),
    ]);
    (line, row_style)
}
