//! Maps a sample onto a fixed display range for the radial dials.

use crate::types::{Metric, Reading};

/// Sweep of the dials drawn by the UI, in degrees.
pub const DIAL_SWEEP_DEG: f64 = 270.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugePosition {
    /// 0..=1 position inside the range. Meaningless when `empty`.
    pub percent: f64,
    /// No value to show; the UI prints a placeholder instead.
    pub empty: bool,
}

impl GaugePosition {
    pub const EMPTY: GaugePosition = GaugePosition {
        percent: 0.0,
        empty: true,
    };

    /// Angle covered by the filled arc for a dial with the given sweep.
    pub fn sweep_degrees(&self, sweep: f64) -> f64 {
        if self.empty {
            0.0
        } else {
            self.percent * sweep
        }
    }

    /// Share of a full circle covered by the filled arc.
    pub fn arc_fraction(&self, sweep: f64) -> f64 {
        self.sweep_degrees(sweep) / 360.0
    }
}

/// Never fails: a degenerate span is widened to 1, a missing or non-finite value is `EMPTY`.
pub fn map(value: Option<f64>, min: f64, max: f64) -> GaugePosition {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return GaugePosition::EMPTY;
    };
    let span = max - min;
    let span = if span.is_finite() && span >= f64::EPSILON {
        span
    } else {
        1.0
    };
    let p = (v - min) / span;
    GaugePosition {
        percent: if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) },
        empty: false,
    }
}

/// Dial position of one metric of a reading (usually the latest).
pub fn position_for(reading: Option<&Reading>, metric: Metric) -> GaugePosition {
    let (min, max) = metric.display_range();
    map(reading.and_then(|r| metric.value(r)), min, max)
}
