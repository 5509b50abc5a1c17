//! Window-size prompt: validates user input and kicks off an immediate refresh.

use std::{fmt, num::NonZeroU32, str::FromStr};

use tracing::{debug, info};

use crate::error::ValidationError;
use crate::poll::PollController;

/// Number of readings requested per poll. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Limit(NonZeroU32);

impl Limit {
    pub const DEFAULT: Limit = Limit(match NonZeroU32::new(20) {
        Some(n) => n,
        None => unreachable!(),
    });

    pub fn new(n: u32) -> Option<Limit> {
        NonZeroU32::new(n).map(Limit)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Limit {
    fn default() -> Self {
        Limit::DEFAULT
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Limit {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        let is_integer = {
            let digits = s.strip_prefix(&['-', '+'][..]).unwrap_or(s);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        };
        if !is_integer {
            return Err(ValidationError::NotANumber(s.to_string()));
        }
        match s.parse::<i64>() {
            Ok(n) if n <= 0 => Err(ValidationError::NotPositive(n)),
            Ok(n) => u32::try_from(n)
                .ok()
                .and_then(Limit::new)
                .ok_or_else(|| ValidationError::OutOfRange(s.to_string())),
            // Only reachable for integers too wide for i64
            Err(_) if s.starts_with('-') => Err(ValidationError::NotPositive(i64::MIN)),
            Err(_) => Err(ValidationError::OutOfRange(s.to_string())),
        }
    }
}

#[derive(Debug, Default)]
pub struct LimitControl {
    input: String,
    editing: bool,
}

impl LimitControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Open the prompt prefilled with the active limit.
    pub fn open(&mut self, current: Limit) {
        self.input = current.to_string();
        self.editing = true;
    }

    pub fn cancel(&mut self) {
        self.input.clear();
        self.editing = false;
    }

    pub fn push(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '-') && self.input.len() < 12 {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Commit whatever is in the prompt buffer and close it.
    pub fn submit(&mut self, controller: &mut PollController) -> Result<Limit, ValidationError> {
        let raw = std::mem::take(&mut self.input);
        self.editing = false;
        self.commit(&raw, controller)
    }

    /// Parse `raw`; on success apply it and poll right away. The periodic timer
    /// keeps its schedule and uses the new limit from its next tick on.
    pub fn commit(
        &mut self,
        raw: &str,
        controller: &mut PollController,
    ) -> Result<Limit, ValidationError> {
        match raw.parse::<Limit>() {
            Ok(limit) => {
                info!(limit = limit.get(), "window limit changed");
                controller.clear_validation_error();
                controller.set_limit(limit);
                controller.poll_once(limit);
                Ok(limit)
            }
            Err(e) => {
                debug!(input = raw, error = %e, "rejected limit input");
                controller.report(e.clone().into());
                Err(e)
            }
        }
    }
}
