//! Continuous simulation time and the clock shared between tracks.
//!
//! # Design
//!
//! Time is a non-negative `f64` wrapped in `SimTime`, which is totally
//! ordered through `f64::total_cmp` so it can key a heap directly.
//!
//! `SharedClock` is a cheap-to-clone handle to one `Cell<SimTime>`.  The
//! enclosing simulation creates it and hands a clone to every track; a
//! track only writes it from `Track::step`, and only forward, to the time of
//! the event it just executed.  Single-threaded by construction (`Rc`).

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in simulated time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// The time `dt` after `self`.
    #[inline]
    pub fn after(self, dt: f64) -> SimTime {
        SimTime(self.0 + dt)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.6}", self.0)
    }
}

// ── SharedClock ───────────────────────────────────────────────────────────────

/// Handle to the simulation clock shared by every track of one simulation.
#[derive(Clone, Debug, Default)]
pub struct SharedClock(Rc<Cell<SimTime>>);

impl SharedClock {
    /// A new clock reading `SimTime::ZERO`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new clock starting at `start`.
    pub fn starting_at(start: SimTime) -> Self {
        SharedClock(Rc::new(Cell::new(start)))
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.0.get()
    }

    /// Move the clock forward to `time`.
    ///
    /// Fails with `ClockRegression` (and leaves the clock untouched) if
    /// `time` is earlier than the current reading.
    pub fn advance_to(&self, time: SimTime) -> CoreResult<()> {
        let now = self.now();
        if time < now {
            return Err(CoreError::ClockRegression { now, requested: time });
        }
        self.0.set(time);
        Ok(())
    }
}
