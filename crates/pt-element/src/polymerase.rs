//! `Polymerase` — the reference moving agent.

use pt_core::{Interval, Position, TrackRng};

use crate::{ElementError, ElementResult, MovingAgent};

/// Which way an agent travels along the track.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    /// Towards higher positions.
    #[default]
    Forward,
    /// Towards position 1.
    Reverse,
}

impl Direction {
    #[inline]
    fn delta(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// A motor protein with a fixed footprint moving one position per event.
///
/// On collision it blocks the mover: whoever runs into a polymerase is
/// pushed back to where it came from.
#[derive(Clone, Debug)]
pub struct Polymerase {
    name:      String,
    interval:  Interval,
    speed:     f64,
    direction: Direction,
    attached:  bool,
}

impl Polymerase {
    /// A forward-moving, attached polymerase covering `[start, stop]`.
    pub fn new(
        name:  impl Into<String>,
        start: Position,
        stop:  Position,
        speed: f64,
    ) -> ElementResult<Self> {
        let name = name.into();
        let interval = Interval::new(start, stop)
            .filter(|iv| iv.start >= 1)
            .ok_or(ElementError::InvalidInterval { start, stop })?;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ElementError::InvalidSpeed { name, speed });
        }
        Ok(Self { name, interval, speed, direction: Direction::Forward, attached: true })
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Width of the footprint in positions.
    #[inline]
    pub fn footprint(&self) -> u32 {
        self.interval.width()
    }

    fn shift(&mut self, delta: i64) -> ElementResult<()> {
        match self.interval.shifted(delta) {
            Some(next) if next.start >= 1 => {
                self.interval = next;
                Ok(())
            }
            _ => Err(ElementError::MovePastOrigin(self.name.clone())),
        }
    }
}

impl MovingAgent for Polymerase {
    fn name(&self) -> &str {
        &self.name
    }

    fn interval(&self) -> Interval {
        self.interval
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn translocate(&mut self) -> ElementResult<()> {
        self.shift(self.direction.delta())
    }

    fn retreat(&mut self) -> ElementResult<()> {
        self.shift(-self.direction.delta())
    }

    fn place_at(&mut self, start: Position) -> ElementResult<()> {
        let width = self.interval.width();
        self.interval = start
            .checked_add(width - 1)
            .and_then(|stop| Interval::new(start, stop))
            .filter(|iv| iv.start >= 1)
            .ok_or(ElementError::InvalidInterval { start, stop: start.saturating_add(width - 1) })?;
        Ok(())
    }

    /// Push the mover back unless an earlier reaction already cleared it.
    fn react(&mut self, mover: &mut dyn MovingAgent, _rng: &mut TrackRng) -> ElementResult<()> {
        if mover.interval().overlaps(self.interval) {
            mover.retreat()?;
        }
        Ok(())
    }
}
