//! UI module root: exposes drawing functions for individual panels.

pub mod dial;
pub mod footer;
pub mod header;
pub mod history;
pub mod stats;
pub mod theme;
pub mod util;
