//! Shared UI theme constants.

use ratatui::style::Color;

use crate::types::Metric;

// Scrollbar colors
pub const SB_ARROW: Color = Color::Rgb(170, 170, 180);
pub const SB_TRACK: Color = Color::Rgb(170, 170, 180);
pub const SB_THUMB: Color = Color::Rgb(170, 170, 180);

// Unfilled part of a dial
pub const DIAL_TRACK: Color = Color::Rgb(60, 60, 70);

pub const HEADER_FG: Color = Color::Cyan;
pub const ERROR_FG: Color = Color::Red;

pub fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::Temperature => Color::LightRed,
        Metric::Humidity => Color::LightBlue,
        Metric::Pressure => Color::LightGreen,
    }
}
