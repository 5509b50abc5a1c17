//! Min/max/average summaries over one metric of the current window.

use crate::types::{Metric, Reading};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub count: usize,
}

impl Stats {
    pub fn of(window: &[Reading], metric: Metric) -> Option<Stats> {
        summarize(window.iter().filter_map(|r| metric.value(r)))
    }
}

/// Non-finite samples are skipped; `None` when nothing finite remains.
pub fn summarize<I>(values: I) -> Option<Stats>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    // Running mean; a plain sum (or `v - mean`) overflows for large finite inputs
    let mut mean = 0.0_f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        count += 1;
        let n = count as f64;
        mean += v / n - mean / n;
        min = min.min(v);
        max = max.max(v);
    }
    if count == 0 {
        return None;
    }
    Some(Stats {
        min,
        max,
        average: mean,
        count,
    })
}
