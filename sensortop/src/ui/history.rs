//! Reading history table (newest first) with zebra striping and a scrollbar.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::types::{Metric, Reading};
use crate::ui::theme::{metric_color, SB_ARROW, SB_THUMB, SB_TRACK};
use crate::ui::util::{fmt_event_time, fmt_value, inner, truncate_middle};

// Keep widths here so drawing and page size math agree.
const COLS: [Constraint; 5] = [
    Constraint::Length(19),     // Time
    Constraint::Length(10),     // Temp
    Constraint::Length(9),      // Humidity
    Constraint::Length(10),     // Pressure
    Constraint::Percentage(40), // Location
];

pub fn draw_history(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    window: &[Reading],
    scroll_offset: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("History ({} readings, newest first)", window.len()));
    f.render_widget(block, area);

    let inner = inner(area);
    if inner.height < 1 || inner.width < 3 {
        return;
    }
    // Reserve a column for the scrollbar
    let content = Rect {
        width: inner.width.saturating_sub(2),
        ..inner
    };

    let total_rows = window.len();
    let viewport_rows = page_size(area);
    let offset = scroll_offset.min(total_rows.saturating_sub(viewport_rows));
    let loc_width = (content.width as usize).saturating_sub(52).max(8);

    let rows = window
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport_rows)
        .map(|(i, r)| {
            let zebra = if i % 2 == 0 {
                Style::default()
            } else {
                Style::default().bg(Color::Rgb(28, 28, 34))
            };
            let emphasis = if i == 0 {
                zebra.add_modifier(Modifier::BOLD)
            } else {
                zebra
            };
            let metric_cell = |m: Metric| {
                Cell::from(fmt_value(m.value(r), m)).style(Style::default().fg(metric_color(m)))
            };
            Row::new(vec![
                Cell::from(fmt_event_time(r)).style(Style::default().fg(Color::DarkGray)),
                metric_cell(Metric::Temperature),
                metric_cell(Metric::Humidity),
                metric_cell(Metric::Pressure),
                Cell::from(truncate_middle(&r.location, loc_width)),
            ])
            .style(emphasis)
        });

    let header = Row::new(vec!["Time", "Temp", "Humidity", "Pressure", "Location"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(rows, COLS.to_vec())
        .header(header)
        .column_spacing(1);
    f.render_widget(table, content);

    draw_scrollbar(f, inner, total_rows, viewport_rows, offset);
}

fn draw_scrollbar(
    f: &mut ratatui::Frame<'_>,
    inner: Rect,
    total_rows: usize,
    view: usize,
    offset: usize,
) {
    let area = Rect {
        x: inner.x + inner.width.saturating_sub(1),
        y: inner.y,
        width: 1,
        height: inner.height,
    };
    if area.height < 3 {
        return;
    }
    let track = (area.height - 2) as usize;
    let total = total_rows.max(1);
    let view = view.clamp(1, total);
    let max_off = total.saturating_sub(view);

    let thumb_len = (track * view).div_ceil(total).max(1).min(track);
    let thumb_top = if max_off == 0 {
        0
    } else {
        ((track - thumb_len) * offset.min(max_off) + max_off / 2) / max_off
    };

    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    lines.push(Line::from(Span::styled("▲", Style::default().fg(SB_ARROW))));
    for i in 0..track {
        if i >= thumb_top && i < thumb_top + thumb_len {
            lines.push(Line::from(Span::styled("█", Style::default().fg(SB_THUMB))));
        } else {
            lines.push(Line::from(Span::styled("│", Style::default().fg(SB_TRACK))));
        }
    }
    lines.push(Line::from(Span::styled("▼", Style::default().fg(SB_ARROW))));
    f.render_widget(Paragraph::new(lines), area);
}

/// Visible data rows for a table drawn in `area` (borders and header excluded).
pub fn page_size(area: Rect) -> usize {
    area.height.saturating_sub(3).max(1) as usize
}

/// Keyboard scrolling (Up/Down/PageUp/PageDown/Home/End). Returns true if the key was used.
pub fn history_handle_key(scroll_offset: &mut usize, key: KeyEvent, page: usize) -> bool {
    match key.code {
        KeyCode::Up => *scroll_offset = scroll_offset.saturating_sub(1),
        KeyCode::Down => *scroll_offset = scroll_offset.saturating_add(1),
        KeyCode::PageUp => *scroll_offset = scroll_offset.saturating_sub(page),
        KeyCode::PageDown => *scroll_offset = scroll_offset.saturating_add(page),
        KeyCode::Home => *scroll_offset = 0,
        KeyCode::End => *scroll_offset = usize::MAX,
        _ => return false,
    }
    true
}

/// Wheel scrolling while the pointer is over the table.
pub fn history_handle_mouse(scroll_offset: &mut usize, mouse: MouseEvent, area: Rect) {
    let inside = mouse.column >= area.x
        && mouse.column < area.x + area.width
        && mouse.row >= area.y
        && mouse.row < area.y + area.height;
    if !inside {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => *scroll_offset = scroll_offset.saturating_sub(1),
        MouseEventKind::ScrollDown => *scroll_offset = scroll_offset.saturating_add(1),
        _ => {}
    }
}

pub fn history_clamp(scroll_offset: &mut usize, total_rows: usize, page: usize) {
    *scroll_offset = (*scroll_offset).min(total_rows.saturating_sub(page));
}
