//! Reference fixed annotations: promoters and terminators.

use std::collections::HashMap;

use pt_core::{Interval, Position, TrackRng};

use crate::{ElementError, ElementResult, FixedAnnotation, MovingAgent};

// ── CoverState ────────────────────────────────────────────────────────────────

/// Covered flag plus the value it had at the last
/// [`reset_state`][Self::reset_state], so callers can ask whether coverage
/// changed since then.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct CoverState {
    covered:     bool,
    old_covered: bool,
}

impl CoverState {
    #[inline]
    pub fn is_covered(&self) -> bool {
        self.covered
    }

    #[inline]
    pub fn cover(&mut self) {
        self.covered = true;
    }

    #[inline]
    pub fn uncover(&mut self) {
        self.covered = false;
    }

    /// Became covered since the last reset.
    #[inline]
    pub fn was_covered(&self) -> bool {
        self.covered && !self.old_covered
    }

    /// Became uncovered since the last reset.
    #[inline]
    pub fn was_uncovered(&self) -> bool {
        !self.covered && self.old_covered
    }

    /// Snapshot the current coverage as the new baseline.
    #[inline]
    pub fn reset_state(&mut self) {
        self.old_covered = self.covered;
    }
}

fn site_interval(start: Position, stop: Position) -> ElementResult<Interval> {
    Interval::new(start, stop)
        .filter(|iv| iv.start >= 1)
        .ok_or(ElementError::InvalidInterval { start, stop })
}

// ── BindingSite ───────────────────────────────────────────────────────────────

/// A promoter-like site: agents listed in its interaction map may bind it,
/// and its release ("free_promoter") is what the track reports when the
/// last covering agent moves off.
#[derive(Clone, Debug)]
pub struct BindingSite {
    name:           String,
    interval:       Interval,
    interactions:   HashMap<String, f64>,
    state:          CoverState,
    first_exposure: bool,
}

impl BindingSite {
    /// `interactions` maps agent names to binding affinities (finite, ≥ 0).
    pub fn new<I, S>(
        name:         impl Into<String>,
        start:        Position,
        stop:         Position,
        interactions: I,
    ) -> ElementResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let interval = site_interval(start, stop)?;
        let mut map = HashMap::new();
        for (species, value) in interactions {
            let species = species.into();
            if !value.is_finite() || value < 0.0 {
                return Err(ElementError::InvalidAffinity { species, value });
            }
            map.insert(species, value);
        }
        Ok(Self {
            name: name.into(),
            interval,
            interactions: map,
            state: CoverState::default(),
            first_exposure: false,
        })
    }

    /// Binding affinity for `species`, if it interacts at all.
    pub fn affinity(&self, species: &str) -> Option<f64> {
        self.interactions.get(species).copied()
    }

    #[inline]
    pub fn state(&self) -> &CoverState {
        &self.state
    }

    #[inline]
    pub fn reset_state(&mut self) {
        self.state.reset_state();
    }

    #[inline]
    pub fn first_exposure(&self) -> bool {
        self.first_exposure
    }

    pub fn set_first_exposure(&mut self, exposed: bool) {
        self.first_exposure = exposed;
    }
}

impl FixedAnnotation for BindingSite {
    fn name(&self) -> &str {
        &self.name
    }

    fn interval(&self) -> Interval {
        self.interval
    }

    fn check_interaction(&self, agent: &str) -> bool {
        self.interactions.contains_key(agent)
    }

    fn is_covered(&self) -> bool {
        self.state.is_covered()
    }

    fn cover(&mut self) {
        self.state.cover();
    }

    fn uncover(&mut self) {
        self.state.uncover();
    }

    fn react(&mut self, _agent: &mut dyn MovingAgent, _rng: &mut TrackRng) -> ElementResult<()> {
        Ok(())
    }
}

// ── ReleaseSite ───────────────────────────────────────────────────────────────

/// A terminator-like site: an interacting agent that covers it detaches with
/// probability `efficiency(agent)`.  An agent that escapes sets
/// `readthrough`, which holds until the site is uncovered again.
#[derive(Clone, Debug)]
pub struct ReleaseSite {
    name:         String,
    interval:     Interval,
    efficiencies: HashMap<String, f64>,
    state:        CoverState,
    readthrough:  bool,
}

impl ReleaseSite {
    /// `efficiencies` maps agent names to termination probabilities in
    /// `[0, 1]`.
    pub fn new<I, S>(
        name:         impl Into<String>,
        start:        Position,
        stop:         Position,
        efficiencies: I,
    ) -> ElementResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let interval = site_interval(start, stop)?;
        let mut map = HashMap::new();
        for (species, value) in efficiencies {
            let species = species.into();
            if !(0.0..=1.0).contains(&value) {
                return Err(ElementError::InvalidEfficiency { species, value });
            }
            map.insert(species, value);
        }
        Ok(Self {
            name: name.into(),
            interval,
            efficiencies: map,
            state: CoverState::default(),
            readthrough: false,
        })
    }

    pub fn efficiency(&self, species: &str) -> Option<f64> {
        self.efficiencies.get(species).copied()
    }

    #[inline]
    pub fn readthrough(&self) -> bool {
        self.readthrough
    }

    pub fn set_readthrough(&mut self, readthrough: bool) {
        self.readthrough = readthrough;
    }

    #[inline]
    pub fn state(&self) -> &CoverState {
        &self.state
    }
}

impl FixedAnnotation for ReleaseSite {
    fn name(&self) -> &str {
        &self.name
    }

    fn interval(&self) -> Interval {
        self.interval
    }

    fn check_interaction(&self, agent: &str) -> bool {
        self.efficiencies.contains_key(agent)
    }

    fn is_covered(&self) -> bool {
        self.state.is_covered()
    }

    fn cover(&mut self) {
        self.state.cover();
    }

    fn uncover(&mut self) {
        self.state.uncover();
        self.readthrough = false;
    }

    fn react(&mut self, agent: &mut dyn MovingAgent, rng: &mut TrackRng) -> ElementResult<()> {
        if self.readthrough {
            return Ok(());
        }
        let efficiency = self.efficiency(agent.name()).unwrap_or(0.0);
        if rng.gen_bool(efficiency) {
            agent.detach();
        } else {
            self.readthrough = true;
        }
        Ok(())
    }
}
