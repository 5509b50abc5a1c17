//! sensortop: live terminal monitor for a remote temperature/humidity/pressure sensor.
//!
//! Polls `GET {base}/api/readings/latest` on a fixed cadence and derives dial
//! positions, window statistics and a history table from the latest window.

pub mod app;
pub mod config;
pub mod error;
pub mod gauge;
pub mod http;
pub mod limit;
pub mod poll;
pub mod stats;
pub mod store;
pub mod types;
pub mod ui;
