//! The `MovingAgent` capability trait.

use pt_core::{Interval, Position, TrackRng};

use crate::ElementResult;

/// Something that occupies an interval on a track and advances over time
/// (a polymerase, a ribosome, …).
///
/// The engine draws waiting times from [`speed`][Self::speed], calls
/// [`translocate`][Self::translocate] once per event, and retires the agent
/// once [`is_attached`][Self::is_attached] turns false.  Position changes
/// only through `translocate`/`retreat`/`place_at`; the width `stop - start` never
/// changes.
pub trait MovingAgent {
    fn name(&self) -> &str;

    /// Current closed footprint on the track.
    fn interval(&self) -> Interval;

    #[inline]
    fn start(&self) -> Position {
        self.interval().start
    }

    #[inline]
    fn stop(&self) -> Position {
        self.interval().stop
    }

    /// Movement rate (events per unit time).  Always > 0.
    fn speed(&self) -> f64;

    fn is_attached(&self) -> bool;

    /// Clear the attached flag.  The engine retires the agent at its next
    /// event.
    fn detach(&mut self);

    /// Shift the footprint one position in the direction of travel.
    fn translocate(&mut self) -> ElementResult<()>;

    /// Undo one [`translocate`][Self::translocate].
    fn retreat(&mut self) -> ElementResult<()>;

    /// Move the footprint so it begins at `start`, keeping its width.
    /// Used when binding to a promoter chosen by the track.
    fn place_at(&mut self, start: Position) -> ElementResult<()>;

    /// Does this agent interact with an agent named `other`?
    ///
    /// Default: interacts with everything.
    fn check_interaction(&self, _other: &str) -> bool {
        true
    }

    /// Called when `mover` has just moved into this agent's footprint.
    ///
    /// May mutate either side (detach, retreat, …) but must not try to
    /// remove anything from the track; retirement belongs to the engine.
    fn react(&mut self, mover: &mut dyn MovingAgent, rng: &mut TrackRng) -> ElementResult<()>;
}
