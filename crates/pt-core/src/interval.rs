//! Closed position intervals on a track and the overlap test.

use std::fmt;

/// A 1-based position on a track.
pub type Position = u32;

/// Do the closed segments `[x1, x2]` and `[y1, y2]` share at least one
/// position?
///
/// Symmetric under swapping the two segments.  Overlap alone does not mean
/// two elements interact; callers conjoin it with a capability check.
#[inline]
pub fn segments_intersect(x1: Position, x2: Position, y1: Position, y2: Position) -> bool {
    x2 >= y1 && y2 >= x1
}

/// A closed interval `[start, stop]` with `start <= stop`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    pub start: Position,
    pub stop:  Position,
}

impl Interval {
    /// Build an interval, returning `None` when `start > stop`.
    pub fn new(start: Position, stop: Position) -> Option<Self> {
        (start <= stop).then_some(Self { start, stop })
    }

    /// Number of positions covered (closed on both ends).
    #[inline]
    pub fn width(self) -> u32 {
        self.stop - self.start + 1
    }

    #[inline]
    pub fn overlaps(self, other: Interval) -> bool {
        segments_intersect(self.start, self.stop, other.start, other.stop)
    }

    /// Is the whole interval inside `1..=length`?
    #[inline]
    pub fn within(self, length: Position) -> bool {
        self.start >= 1 && self.stop <= length
    }

    /// The interval moved `delta` positions; `None` on underflow/overflow.
    pub fn shifted(self, delta: i64) -> Option<Interval> {
        let start = u32::try_from(i64::from(self.start) + delta).ok()?;
        let stop = u32::try_from(i64::from(self.stop) + delta).ok()?;
        Some(Interval { start, stop })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}
