//! Top header: sensor, location, fetch indicator, last update and the current error.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::poll::PollController;
use crate::ui::theme::{ERROR_FG, HEADER_FG};
use crate::ui::util::fmt_clock;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, ctl: &PollController) {
    let location = ctl
        .store()
        .latest()
        .map(|r| r.location.as_str())
        .filter(|l| !l.is_empty())
        .unwrap_or("unknown location");
    let activity = if ctl.is_fetching() { "⟳ fetching" } else { "idle" };
    let title = format!(
        "sensortop — sensor: {} @ {} | limit: {} | updated: {} | {}  (press 'q' to quit)",
        ctl.sensor_id(),
        location,
        ctl.limit(),
        fmt_clock(ctl.last_updated()),
        activity,
    );

    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default().fg(HEADER_FG).add_modifier(Modifier::BOLD),
    ))];
    if let Some(e) = ctl.error() {
        lines.push(Line::from(Span::styled(
            format!("⚠ {e}"),
            Style::default().fg(ERROR_FG),
        )));
    } else if ctl.store().is_empty() && ctl.last_updated().is_none() {
        lines.push(Line::from("waiting for first readings..."));
    }
    f.render_widget(Paragraph::new(lines), area);
}
