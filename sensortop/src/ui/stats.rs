//! Min / max / average over the current window, one row per metric.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::stats::Stats;
use crate::types::{Metric, Reading};
use crate::ui::theme::metric_color;
use crate::ui::util::{fmt_value, PLACEHOLDER};

const COLS: [Constraint; 5] = [
    Constraint::Length(12), // Metric
    Constraint::Length(12), // Min
    Constraint::Length(12), // Max
    Constraint::Length(12), // Avg
    Constraint::Length(6),  // N
];

pub fn draw_stats(f: &mut ratatui::Frame<'_>, area: Rect, window: &[Reading]) {
    let rows = Metric::ALL.into_iter().map(|metric| {
        let cells = match Stats::of(window, metric) {
            Some(s) => vec![
                fmt_value(Some(s.min), metric),
                fmt_value(Some(s.max), metric),
                fmt_value(Some(s.average), metric),
                s.count.to_string(),
            ],
            None => vec![PLACEHOLDER.to_string(); 4],
        };
        let mut row =
            vec![Cell::from(metric.label()).style(Style::default().fg(metric_color(metric)))];
        row.extend(cells.into_iter().map(Cell::from));
        Row::new(row)
    });

    let header = Row::new(vec!["", "Min", "Max", "Avg", "N"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(rows, COLS.to_vec())
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Window stats ({} readings)", window.len())),
        );
    f.render_widget(table, area);
}
