//! The `FixedAnnotation` capability trait.

use pt_core::{Interval, TrackRng};

use crate::{ElementResult, MovingAgent};

/// A static, named interval on a track (promoter, terminator, binding
/// site, …) that moving agents can cover and uncover.
///
/// Coverage state belongs to the annotation.  The engine calls
/// [`cover`][Self::cover] when an agent newly overlaps it and
/// [`uncover`][Self::uncover] when the overlap ends.
pub trait FixedAnnotation {
    fn name(&self) -> &str;

    fn interval(&self) -> Interval;

    /// Does an agent named `agent` interact with this annotation?
    fn check_interaction(&self, agent: &str) -> bool;

    fn is_covered(&self) -> bool;

    fn cover(&mut self);

    fn uncover(&mut self);

    /// Called right after [`cover`][Self::cover] with the agent that
    /// covered it.
    fn react(&mut self, agent: &mut dyn MovingAgent, rng: &mut TrackRng) -> ElementResult<()>;
}
