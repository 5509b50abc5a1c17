//! Bottom line: key help, or the limit prompt while it is open.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::limit::LimitControl;

pub fn draw_footer(f: &mut ratatui::Frame<'_>, area: Rect, limit: &LimitControl) {
    let line = if limit.is_editing() {
        Line::from(vec![
            Span::styled("Readings to show: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}▏", limit.input()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Enter apply · Esc cancel", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            "q quit · r refresh · l set limit · ↑↓ PgUp PgDn Home End scroll",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::TOP)), area);
}
