//! Shared helpers: a scripted in-memory reading source and reading builders.
#![allow(dead_code)]

use std::{collections::VecDeque, sync::Mutex, time::Duration};

use futures::future::BoxFuture;
use sensortop::config::MonitorConfig;
use sensortop::error::FetchError;
use sensortop::http::ReadingsSource;
use sensortop::limit::Limit;
use sensortop::types::{DateLike, Reading};
use tokio::sync::oneshot;

pub type Outcome = Result<Vec<Reading>, FetchError>;

enum Scripted {
    Ready(Outcome),
    Gated(oneshot::Receiver<Outcome>),
    Delayed(Duration, Outcome),
}

/// Answers polls from a queue; an empty queue answers with an empty window.
#[derive(Default)]
pub struct ScriptedSource {
    calls: Mutex<Vec<(String, u32)>>,
    script: Mutex<VecDeque<Scripted>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: Outcome) {
        self.script.lock().unwrap().push_back(Scripted::Ready(outcome));
    }

    /// The next poll hangs until the returned sender fires.
    pub fn push_gated(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    /// The next poll answers after `latency` of (possibly paused) tokio time.
    pub fn push_delayed(&self, latency: Duration, outcome: Outcome) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Delayed(latency, outcome));
    }

    pub fn limits(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(_, l)| *l).collect()
    }

    pub fn sensors(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ReadingsSource for ScriptedSource {
    fn fetch_latest(&self, sensor_id: &str, limit: Limit) -> BoxFuture<'static, Outcome> {
        self.calls
            .lock()
            .unwrap()
            .push((sensor_id.to_string(), limit.get()));
        let next = self.script.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                None => Ok(Vec::new()),
                Some(Scripted::Ready(o)) => o,
                Some(Scripted::Gated(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".into()))),
                Some(Scripted::Delayed(latency, o)) => {
                    tokio::time::sleep(latency).await;
                    o
                }
            }
        })
    }
}

pub fn config(interval: Duration) -> MonitorConfig {
    MonitorConfig {
        sensor_id: "greenhouse-1".into(),
        poll_interval: interval,
        ..MonitorConfig::default()
    }
}

pub fn limit(n: u32) -> Limit {
    Limit::new(n).unwrap()
}

pub fn reading(id: &str, temperature: f64, timestamp: Option<&str>) -> Reading {
    Reading {
        id: id.into(),
        sensor_id: "greenhouse-1".into(),
        location: "north bench".into(),
        temperature,
        humidity: 55.0,
        pressure: Some(1012.0),
        timestamp: timestamp.map(|t| DateLike::Text(t.into())),
        created_at: None,
        updated_at: None,
    }
}

pub fn ids(window: &[Reading]) -> Vec<&str> {
    window.iter().map(|r| r.id.as_str()).collect()
}
