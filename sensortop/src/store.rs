//! Holds the current window of readings. Every successful poll replaces it wholesale.

use std::cmp::Ordering;

use chrono::{DateTime, Local};
use tracing::warn;

use crate::types::Reading;

#[derive(Debug, Default)]
pub struct ReadingStore {
    window: Vec<Reading>,
    last_updated: Option<DateTime<Local>>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new window. The service promises newest first; if it breaks that
    /// promise the window is re-sorted with `newest_first` instead of shown as is.
    pub fn replace(&mut self, mut window: Vec<Reading>) {
        if !is_newest_first(&window) {
            warn!(
                len = window.len(),
                "reading window not newest-first; re-sorting by event time"
            );
            window.sort_by(newest_first);
        }
        self.window = window;
        self.last_updated = Some(Local::now());
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.window.first()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.window
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}

/// Only readings with a known event time can be out of order.
pub fn is_newest_first(window: &[Reading]) -> bool {
    let times: Vec<_> = window.iter().filter_map(Reading::effective_time).collect();
    times.windows(2).all(|w| w[0] >= w[1])
}

/// Event time descending, unknown time last, ties by id ascending.
pub fn newest_first(a: &Reading, b: &Reading) -> Ordering {
    match (a.effective_time(), b.effective_time()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.id.cmp(&b.id))
}
