//! Poll loop: periodic and on-demand fetches, request lifecycle and error state.
//!
//! Background tasks never touch state. The interval timer and every fetch report
//! back over a channel, and whoever owns the controller applies those events
//! (`drain` from the UI loop, `next_event`/`settle` from async callers).
//! Each request carries a token; only the response to the most recently issued
//! request is applied, so a slow older response cannot overwrite fresher data.
//! A timer tick that finds a request still outstanding is skipped rather than
//! superseding it, up to `MAX_SKIPPED_TICKS` in a row; after that the next tick
//! gives up on the stuck request and issues a fresh one.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Local};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::error::{FetchError, MonitorError};
use crate::http::ReadingsSource;
use crate::limit::Limit;
use crate::store::ReadingStore;
use crate::types::Reading;

/// Consecutive ticks skipped for one outstanding request before it is superseded.
pub const MAX_SKIPPED_TICKS: u32 = 2;

#[derive(Debug)]
pub enum PollEvent {
    Tick {
        generation: u64,
    },
    Completed {
        token: u64,
        limit: Limit,
        outcome: Result<Vec<Reading>, FetchError>,
    },
}

pub struct PollController {
    source: Arc<dyn ReadingsSource>,
    sensor_id: String,
    limit: Limit,
    interval: Duration,
    store: ReadingStore,
    error: Option<MonitorError>,

    // Request tokens: last one handed out, and the one whose response we still want
    next_token: u64,
    awaiting: Option<u64>,
    skipped_ticks: u32,

    // Timer instance; bumped on every restart/stop so queued ticks from an old timer are ignored
    generation: u64,
    ticker: Option<JoinHandle<()>>,

    tx: UnboundedSender<PollEvent>,
    rx: UnboundedReceiver<PollEvent>,
}

impl PollController {
    pub fn new(config: &MonitorConfig, source: Arc<dyn ReadingsSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            sensor_id: config.sensor_id.clone(),
            limit: config.limit,
            interval: config.poll_interval,
            store: ReadingStore::new(),
            error: None,
            next_token: 0,
            awaiting: None,
            skipped_ticks: 0,
            generation: 0,
            ticker: None,
            tx,
            rx,
        }
    }

    /// Poll now, then every interval. Restarts the timer if one is already running.
    pub fn start(&mut self, limit: Limit) {
        self.stop_timer();
        self.limit = limit;
        info!(
            sensor = %self.sensor_id,
            limit = limit.get(),
            interval_ms = self.interval.as_millis() as u64,
            "polling started"
        );
        self.poll_once(limit);

        let tx = self.tx.clone();
        let period = self.interval;
        let generation = self.generation;
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(PollEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancel the timer. Anything still in flight is discarded when it lands.
    pub fn stop(&mut self) {
        if self.ticker.is_some() {
            info!(sensor = %self.sensor_id, "polling stopped");
        }
        self.stop_timer();
        self.awaiting = None;
    }

    fn stop_timer(&mut self) {
        if let Some(h) = self.ticker.take() {
            h.abort();
        }
        self.generation += 1;
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Issue one request and return its token. Clears a pending fetch error.
    pub fn poll_once(&mut self, limit: Limit) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.skipped_ticks = 0;
        if let Some(prev) = self.awaiting.replace(token) {
            debug!(superseded = prev, token, "request issued while another is outstanding");
        }
        if self.error.as_ref().is_some_and(MonitorError::is_fetch) {
            self.error = None;
        }
        debug!(token, limit = limit.get(), sensor = %self.sensor_id, "poll");

        let fut = self.source.fetch_latest(&self.sensor_id, limit);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fut.await;
            let _ = tx.send(PollEvent::Completed {
                token,
                limit,
                outcome,
            });
        });
        token
    }

    /// Poll now with the active limit.
    pub fn refresh(&mut self) -> u64 {
        self.poll_once(self.limit)
    }

    fn apply(&mut self, ev: PollEvent) {
        match ev {
            PollEvent::Tick { generation } => {
                if generation != self.generation || self.ticker.is_none() {
                    return;
                }
                if let Some(token) = self.awaiting {
                    if self.skipped_ticks < MAX_SKIPPED_TICKS {
                        self.skipped_ticks += 1;
                        debug!(
                            token,
                            skipped = self.skipped_ticks,
                            "tick skipped; request still outstanding"
                        );
                        return;
                    }
                    warn!(token, "request outstanding for too long; superseding it");
                }
                self.poll_once(self.limit);
            }
            PollEvent::Completed {
                token,
                limit,
                outcome,
            } => {
                if self.awaiting != Some(token) {
                    debug!(token, latest = self.next_token, "dropping stale response");
                    return;
                }
                self.awaiting = None;
                match outcome {
                    Ok(window) => {
                        debug!(token, limit = limit.get(), count = window.len(), "window updated");
                        self.store.replace(window);
                        if self.error.as_ref().is_some_and(MonitorError::is_fetch) {
                            self.error = None;
                        }
                    }
                    Err(e) => {
                        warn!(token, error = %e, "poll failed; keeping previous window");
                        self.error = Some(e.into());
                    }
                }
            }
        }
    }

    /// Apply everything that has already arrived, without waiting. Returns how many events ran.
    pub fn drain(&mut self) -> usize {
        let mut n = 0;
        while let Ok(ev) = self.rx.try_recv() {
            self.apply(ev);
            n += 1;
        }
        n
    }

    /// Wait for the next event and apply it.
    pub async fn next_event(&mut self) {
        // We hold a sender ourselves, so the channel never closes
        if let Some(ev) = self.rx.recv().await {
            self.apply(ev);
        }
    }

    /// Wait until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.is_fetching() {
            self.next_event().await;
        }
    }

    /// Show an error in the shared message slot, replacing any prior one.
    pub fn report(&mut self, e: MonitorError) {
        self.error = Some(e);
    }

    pub fn clear_validation_error(&mut self) {
        if matches!(self.error, Some(MonitorError::Validation(_))) {
            self.error = None;
        }
    }

    pub fn set_limit(&mut self, limit: Limit) {
        self.limit = limit;
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_fetching(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn error(&self) -> Option<&MonitorError> {
        self.error.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.store.last_updated()
    }

    pub fn store(&self) -> &ReadingStore {
        &self.store
    }
}

impl Drop for PollController {
    fn drop(&mut self) {
        if let Some(h) = self.ticker.take() {
            h.abort();
        }
    }
}
