//! Radial dials for the latest temperature, humidity and pressure.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
};

use crate::gauge::{position_for, GaugePosition, DIAL_SWEEP_DEG};
use crate::types::{Metric, Reading};
use crate::ui::theme::{metric_color, DIAL_TRACK};
use crate::ui::util::{fmt_value, inner, PLACEHOLDER};

// The arc opens at the bottom: starts at 225° and runs clockwise
const START_DEG: f64 = 225.0;
const ARC_STEPS: usize = 96;
const RADII: [f64; 3] = [0.86, 0.93, 1.0];

pub fn draw_dials(f: &mut ratatui::Frame<'_>, area: Rect, latest: Option<&Reading>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    for (metric, slot) in Metric::ALL.into_iter().zip(cols.iter()) {
        draw_dial(f, *slot, metric, latest);
    }
}

fn draw_dial(f: &mut ratatui::Frame<'_>, area: Rect, metric: Metric, latest: Option<&Reading>) {
    let (min, max) = metric.display_range();
    let title = format!("{} ({min:.0}–{max:.0} {})", metric.label(), metric.unit());
    f.render_widget(Block::default().borders(Borders::ALL).title(title), area);

    let body = inner(area);
    if body.height < 3 || body.width < 6 {
        return;
    }
    let pos = position_for(latest, metric);
    let (filled, track) = arc_points(pos);

    // Braille dots are roughly square, so widen x by the cell aspect to keep the arc round
    let y_half = 1.15;
    let x_half = y_half * (body.width as f64 * 2.0) / (body.height as f64 * 4.0);
    let color = metric_color(metric);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-y_half, y_half])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &track,
                color: DIAL_TRACK,
            });
            ctx.draw(&Points {
                coords: &filled,
                color,
            });
        });
    f.render_widget(canvas, body);

    let label = if pos.empty {
        PLACEHOLDER.to_string()
    } else {
        fmt_value(latest.and_then(|r| metric.value(r)), metric)
    };
    let center = Rect {
        x: body.x,
        y: body.y + body.height / 2,
        width: body.width,
        height: 1,
    };
    let text = Line::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), center);
}

/// Split the dial's arc into (filled, unfilled) points for the given position.
fn arc_points(pos: GaugePosition) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let lit_deg = pos.sweep_degrees(DIAL_SWEEP_DEG);
    let mut filled = Vec::new();
    let mut track = Vec::new();
    for i in 0..=ARC_STEPS {
        let along = DIAL_SWEEP_DEG * i as f64 / ARC_STEPS as f64;
        let rad = (START_DEG - along).to_radians();
        let target = if !pos.empty && along <= lit_deg {
            &mut filled
        } else {
            &mut track
        };
        for r in RADII {
            target.push((r * rad.cos(), r * rad.sin()));
        }
    }
    (filled, track)
}
