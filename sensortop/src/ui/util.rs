//! Small UI helpers: value/time formatting, truncation, inner rects.

use chrono::{DateTime, Local};
use ratatui::layout::Rect;

use crate::types::{Metric, Reading};

/// Placeholder for missing or non-finite values.
pub const PLACEHOLDER: &str = "—";

pub fn fmt_value(v: Option<f64>, metric: Metric) -> String {
    match v.filter(|v| v.is_finite()) {
        Some(v) => match metric {
            Metric::Pressure => format!("{v:.0} {}", metric.unit()),
            _ => format!("{v:.1} {}", metric.unit()),
        },
        None => PLACEHOLDER.into(),
    }
}

pub fn fmt_event_time(r: &Reading) -> String {
    match r.effective_time() {
        Some(t) => t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unknown time".into(),
    }
}

pub fn fmt_clock(t: Option<DateTime<Local>>) -> String {
    t.map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".into())
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max { return s.to_string(); }
    if max <= 3 { return "...".into(); }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(n - right).collect();
    format!("{head}...{tail}")
}

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
