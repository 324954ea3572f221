//! `Mask` — the not-yet-accessible tail of a track.

use std::collections::HashSet;

use pt_core::{Interval, Position};

use crate::{ElementError, ElementResult};

/// Covers `[start, stop]` until agents push it back one position at a time.
///
/// Sites under the mask stay covered.  An agent running into the mask
/// either pushes it back (if listed in `interactions`) or is stopped.  Once
/// `start` passes `stop` the mask is gone.
#[derive(Clone, Debug)]
pub struct Mask {
    start:        Position,
    stop:         Position,
    interactions: HashSet<String>,
}

impl Mask {
    pub fn new<I, S>(start: Position, stop: Position, interactions: I) -> ElementResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if start < 1 || start > stop {
            return Err(ElementError::InvalidInterval { start, stop });
        }
        Ok(Self {
            start,
            stop,
            interactions: interactions.into_iter().map(Into::into).collect(),
        })
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> Position {
        self.stop
    }

    /// The covered interval, or `None` once the mask has fully receded.
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start, self.stop)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.start <= self.stop
    }

    /// Can an agent named `agent` push this mask back?
    pub fn check_interaction(&self, agent: &str) -> bool {
        self.interactions.contains(agent)
    }

    /// Expose one more position.
    pub fn recede(&mut self) {
        self.start = self.start.saturating_add(1);
    }
}
