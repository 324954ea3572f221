//! The `Track` struct and its step cycle.

use std::collections::BTreeMap;
use std::fmt;

use pt_core::{AgentId, Interval, Position, SharedClock, SimTime, SiteId, TrackId, TrackRng};
use pt_element::{FixedAnnotation, Mask, MovingAgent};
use pt_schedule::{EventQueue, ScheduledEvent};
use tracing::{debug, trace};

use crate::observer::{Action, ObserverRegistry, TrackObserver, TrackRef};
use crate::resolver::{covers, newly_entered, newly_left, overlapping_agents, overlapping_sites};
use crate::{TrackError, TrackResult};

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What one [`Track::step`] did.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StepOutcome {
    /// The agent moved and is queued again at `next`.
    Rescheduled { agent: AgentId, time: SimTime, next: SimTime },
    /// The agent was detached and has left the track.
    Retired { agent: AgentId, time: SimTime },
}

impl StepOutcome {
    pub fn agent(&self) -> AgentId {
        match *self {
            StepOutcome::Rescheduled { agent, .. } | StepOutcome::Retired { agent, .. } => agent,
        }
    }

    /// Time of the executed event.
    pub fn time(&self) -> SimTime {
        match *self {
            StepOutcome::Rescheduled { time, .. } | StepOutcome::Retired { time, .. } => time,
        }
    }
}

// ── Track ─────────────────────────────────────────────────────────────────────

/// One linear polymer with its moving agents, fixed annotations and event
/// queue.
///
/// Every bound agent has exactly one entry in the queue until it retires.
/// The shared clock is written only by [`step`][Self::step], and only to the
/// time of the event it executed.
///
/// A site stays covered while any interacting agent or the mask overlaps
/// it.  `uncovered` caches, per annotation name, how many such sites are
/// currently free.
///
/// Create via [`TrackBuilder`][crate::TrackBuilder] or [`Track::new`].
pub struct Track {
    id:          TrackId,
    name:        String,
    length:      Position,
    /// Bound agents, ascending id = bind order.
    agents:      BTreeMap<AgentId, Box<dyn MovingAgent>>,
    next_agent:  AgentId,
    annotations: Vec<Box<dyn FixedAnnotation>>,
    uncovered:   BTreeMap<String, usize>,
    mask:        Option<Mask>,
    /// Rate multiplier per position, indexed by `position - 1`.
    weights:     Option<Vec<f64>>,
    queue:       EventQueue,
    observers:   ObserverRegistry,
    clock:       SharedClock,
    rng:         TrackRng,
}

impl Track {
    /// An empty track of `length` positions (`1..=length`).
    pub fn new(
        id:     TrackId,
        name:   impl Into<String>,
        length: Position,
        clock:  SharedClock,
        rng:    TrackRng,
    ) -> TrackResult<Self> {
        if length == 0 {
            return Err(TrackError::InvalidLength);
        }
        Ok(Self {
            id,
            name: name.into(),
            length,
            agents: BTreeMap::new(),
            next_agent: AgentId(0),
            annotations: Vec::new(),
            uncovered: BTreeMap::new(),
            mask: None,
            weights: None,
            queue: EventQueue::new(),
            observers: ObserverRegistry::new(),
            clock,
            rng,
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Add a fixed annotation.  Add annotations before binding agents; a
    /// newly added site is not covered retroactively by agents, only by the
    /// mask.
    pub fn add_annotation(&mut self, site: Box<dyn FixedAnnotation>) -> TrackResult<SiteId> {
        let interval = site.interval();
        if !interval.within(self.length) {
            return Err(TrackError::OutOfBounds {
                what: format!("annotation {}", site.name()),
                interval,
                length: self.length,
            });
        }
        let id = SiteId::try_from(self.annotations.len())
            .map_err(|e| TrackError::IllegalState(format!("too many annotations: {e}")))?;
        let count = self.uncovered.entry(site.name().to_owned()).or_default();
        if !site.is_covered() {
            *count += 1;
        }
        let masked = self.mask_interval().is_some_and(|m| m.overlaps(interval));
        self.annotations.push(site);
        if masked {
            self.cover_site(id)?;
        }
        Ok(id)
    }

    /// Hide `mask`'s region behind a receding mask, covering every
    /// annotation under it.  Only one mask per track, set before binding.
    pub fn set_mask(&mut self, mask: Mask) -> TrackResult<()> {
        if self.mask.is_some() {
            return Err(TrackError::IllegalState(format!("{} already has a mask", self.name)));
        }
        if !self.agents.is_empty() {
            return Err(TrackError::IllegalState(format!(
                "{}: set the mask before binding agents",
                self.name
            )));
        }
        let Some(interval) = mask.interval() else {
            return Ok(());
        };
        if !interval.within(self.length) {
            return Err(TrackError::OutOfBounds { what: "mask".into(), interval, length: self.length });
        }
        let masked: Vec<SiteId> = self
            .annotations()
            .filter(|(_, site)| site.interval().overlaps(interval))
            .map(|(id, _)| id)
            .collect();
        for site in masked {
            self.cover_site(site)?;
        }
        debug!(track = %self.name, %interval, "mask");
        self.mask = Some(mask);
        Ok(())
    }

    /// Scale every move rate by a per-position weight, looked up at the
    /// agent's leading (`stop`) position.  One finite, positive weight per
    /// position.
    pub fn set_weights(&mut self, weights: Vec<f64>) -> TrackResult<()> {
        if weights.len() != self.length as usize {
            return Err(TrackError::InvalidWeights(format!(
                "{} weights for {} positions",
                weights.len(),
                self.length
            )));
        }
        if let Some((i, w)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite() || **w <= 0.0) {
            return Err(TrackError::InvalidWeights(format!(
                "weight {w} at position {} must be finite and > 0",
                i + 1
            )));
        }
        self.weights = Some(weights);
        Ok(())
    }

    pub fn register_observer(&mut self, observer: Box<dyn TrackObserver>) {
        self.observers.register(observer);
    }

    /// Put `agent` on the track and schedule its first move.
    ///
    /// Interacting sites under the agent's footprint are covered (without a
    /// reaction; binding is not a collision).
    pub fn bind(&mut self, agent: Box<dyn MovingAgent>) -> TrackResult<AgentId> {
        if !agent.is_attached() {
            return Err(TrackError::AlreadyDetached(agent.name().to_owned()));
        }
        let interval = agent.interval();
        if !interval.within(self.length) {
            return Err(TrackError::OutOfBounds {
                what: format!("agent {}", agent.name()),
                interval,
                length: self.length,
            });
        }
        if let Some(mask) = self.mask_interval().filter(|m| m.overlaps(interval)) {
            return Err(TrackError::Masked {
                what: format!("agent {}", agent.name()),
                interval,
                mask_start: mask.start,
            });
        }

        let id = self.next_agent;
        let rate = self.rate_for(agent.as_ref())?;
        let time = self.rng.next_time(self.clock.now(), rate)?;
        self.next_agent = id.next();

        for site in overlapping_sites(&self.annotations, agent.as_ref()) {
            self.cover_site(site)?;
        }
        debug!(track = %self.name, %id, agent = agent.name(), %interval, "bind");
        self.agents.insert(id, agent);
        self.queue.push(time, id);
        Ok(id)
    }

    /// Bind `agent` at the start of a free promoter named `promoter`,
    /// chosen uniformly among the uncovered ones.
    pub fn bind_to_promoter(
        &mut self,
        mut agent: Box<dyn MovingAgent>,
        promoter:  &str,
    ) -> TrackResult<AgentId> {
        let free: Vec<usize> = self
            .annotations
            .iter()
            .enumerate()
            .filter(|(_, site)| site.name() == promoter && !site.is_covered())
            .map(|(i, _)| i)
            .collect();
        let Some(choice) = self.rng.choose_index(free.len()) else {
            return Err(TrackError::NoFreePromoter {
                agent:    agent.name().to_owned(),
                promoter: promoter.to_owned(),
            });
        };
        let site = &self.annotations[free[choice]];
        if !site.check_interaction(agent.name()) {
            return Err(TrackError::NoInteraction {
                agent: agent.name().to_owned(),
                site:  site.name().to_owned(),
            });
        }
        agent.place_at(site.interval().start)?;
        self.bind(agent)
    }

    /// Push the mask back one position outside of any collision, exposing
    /// whatever it stops covering.  No-op once the mask is gone.
    pub fn shift_mask(&mut self) -> TrackResult<()> {
        let now = self.clock.now();
        self.recede_mask(None, now)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Execute the earliest scheduled event.
    ///
    /// Fails with `EmptyQueue` (and touches nothing) when no events remain.
    /// The owning driver calls this only when this track holds the globally
    /// earliest event.
    pub fn step(&mut self) -> TrackResult<StepOutcome> {
        let event = *self.queue.peek().ok_or(TrackError::EmptyQueue(self.id))?;
        let now = self.clock.now();
        if event.time < now {
            return Err(TrackError::IllegalState(format!(
                "{} event at {} is behind the shared clock ({now})",
                self.name, event.time
            )));
        }
        self.pop_earliest()?;

        let attached = self.agent_ref(event.agent)?.is_attached();
        if attached {
            self.advance_at(event.agent, event.time)?;
        }

        self.clock
            .advance_to(event.time)
            .map_err(|e| TrackError::IllegalState(e.to_string()))?;

        if self.agent_ref(event.agent)?.is_attached() {
            let next = self.schedule(event.agent)?;
            trace!(track = %self.name, agent = %event.agent, time = %event.time, next = %next.time, "step");
            Ok(StepOutcome::Rescheduled { agent: event.agent, time: event.time, next: next.time })
        } else {
            self.retire(event.agent, event.time)?;
            Ok(StepOutcome::Retired { agent: event.agent, time: event.time })
        }
    }

    /// Move `agent` one position and resolve collisions and coverage, at the
    /// current clock time.
    ///
    /// [`step`][Self::step] does this for the popped agent; calling it
    /// directly moves an agent outside the schedule.
    pub fn advance(&mut self, agent: AgentId) -> TrackResult<()> {
        let now = self.clock.now();
        self.advance_at(agent, now)
    }

    fn advance_at(&mut self, id: AgentId, time: SimTime) -> TrackResult<()> {
        // Take the mover out of the roster so it can be borrowed mutably
        // alongside the agents it collides with.
        let mut agent = self.agents.remove(&id).ok_or_else(|| self.unknown_agent(id))?;
        let result = self.resolve_move(agent.as_mut(), time);
        self.agents.insert(id, agent);
        result
    }

    fn resolve_move(&mut self, agent: &mut dyn MovingAgent, time: SimTime) -> TrackResult<()> {
        // ① What the agent touches before moving.
        let sites_before = overlapping_sites(&self.annotations, agent);
        let agents_before = overlapping_agents(&self.agents, agent);

        // ② Move.
        agent
            .translocate()
            .map_err(|e| TrackError::IllegalState(e.to_string()))?;
        let interval = agent.interval();
        if !interval.within(self.length) {
            return Err(TrackError::IllegalState(format!(
                "{} moved to {interval}, outside {} (1..={})",
                agent.name(),
                self.name,
                self.length
            )));
        }

        // ③ Newly formed agent collisions.  An earlier reaction may already
        // have pushed the agent clear of later ones.
        let agents_after = overlapping_agents(&self.agents, agent);
        for other_id in newly_entered(&agents_before, &agents_after) {
            if let Some(other) = self.agents.get_mut(&other_id) {
                if other.interval().overlaps(agent.interval()) {
                    other.react(agent, &mut self.rng)?;
                }
            }
        }

        // ③b The mask: pushed back by interacting agents, a wall to others.
        if let Some(mask_start) = self.mask_interval().map(|m| m.start) {
            let stop = agent.stop();
            if stop > mask_start {
                return Err(TrackError::IllegalState(format!(
                    "{} at {} overlaps the mask at {mask_start} by more than one position",
                    agent.name(),
                    agent.interval()
                )));
            }
            if stop == mask_start {
                if self.mask.as_ref().is_some_and(|m| m.check_interaction(agent.name())) {
                    self.recede_mask(Some(&*agent), time)?;
                } else {
                    agent.retreat()?;
                }
            }
        }

        // ④ Newly covered sites.  Reactions above may have pushed the agent
        // back, so look again.
        let sites_after = overlapping_sites(&self.annotations, agent);
        for site_id in newly_entered(&sites_before, &sites_after) {
            self.cover_site(site_id)?;
            self.annotations[site_id.index()].react(agent, &mut self.rng)?;
        }

        // ⑤ Sites this agent no longer covers: one notification each.  The
        // site itself stays covered while another agent still sits on it.
        for site_id in newly_left(&sites_before, &sites_after) {
            if !self.still_covered(site_id, None) {
                self.uncover_site(site_id);
            }
            let track = TrackRef { id: self.id, name: &self.name, time };
            self.observers.notify(&track, self.annotations[site_id.index()].name(), Action::FreePromoter);
        }
        Ok(())
    }

    // ── Coverage ──────────────────────────────────────────────────────────

    fn mask_interval(&self) -> Option<Interval> {
        self.mask.as_ref().and_then(Mask::interval)
    }

    /// Is `site` held by the mask, by `mover` (out of the roster while it
    /// moves) or by any bound agent?
    fn still_covered(&self, site: SiteId, mover: Option<&dyn MovingAgent>) -> bool {
        let site = self.annotations[site.index()].as_ref();
        self.mask_interval().is_some_and(|m| m.overlaps(site.interval()))
            || mover.is_some_and(|m| covers(site, m))
            || self.agents.values().any(|a| covers(site, a.as_ref()))
    }

    fn cover_site(&mut self, site: SiteId) -> TrackResult<()> {
        let annotation = &mut self.annotations[site.index()];
        if !annotation.is_covered() {
            let name = annotation.name();
            let count = self.uncovered.get(name).copied().unwrap_or(0);
            let count = count.checked_sub(1).ok_or_else(|| {
                TrackError::IllegalState(format!("uncovered count for {name} would drop below zero"))
            })?;
            self.uncovered.insert(name.to_owned(), count);
        }
        annotation.cover();
        Ok(())
    }

    fn uncover_site(&mut self, site: SiteId) {
        let annotation = &mut self.annotations[site.index()];
        if annotation.is_covered() {
            *self.uncovered.entry(annotation.name().to_owned()).or_default() += 1;
        }
        annotation.uncover();
    }

    /// Recede the mask one position and release the sites it no longer
    /// hides, reporting each as a free promoter.
    fn recede_mask(&mut self, mover: Option<&dyn MovingAgent>, time: SimTime) -> TrackResult<()> {
        let Some(mask) = self.mask.as_mut().filter(|m| m.is_active()) else {
            return Ok(());
        };
        let before = mask.interval();
        mask.recede();
        let after = mask.interval();

        let exposed: Vec<SiteId> = self
            .annotations()
            .filter(|(_, site)| {
                let iv = site.interval();
                before.is_some_and(|m| m.overlaps(iv)) && !after.is_some_and(|m| m.overlaps(iv))
            })
            .map(|(id, _)| id)
            .collect();
        for site_id in exposed {
            if self.still_covered(site_id, mover) {
                continue;
            }
            self.uncover_site(site_id);
            let track = TrackRef { id: self.id, name: &self.name, time };
            self.observers.notify(&track, self.annotations[site_id.index()].name(), Action::FreePromoter);
        }
        Ok(())
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Move rate of `agent` at its current position.
    fn rate_for(&self, agent: &dyn MovingAgent) -> TrackResult<f64> {
        let Some(weights) = &self.weights else {
            return Ok(agent.speed());
        };
        let weight = (agent.stop() as usize).checked_sub(1).and_then(|i| weights.get(i)).ok_or_else(|| {
            TrackError::IllegalState(format!("no weight for position {} on {}", agent.stop(), self.name))
        })?;
        Ok(agent.speed() * weight)
    }

    /// Draw a fresh waiting time for `agent` and queue it.
    fn schedule(&mut self, agent: AgentId) -> TrackResult<ScheduledEvent> {
        let rate = self.rate_for(self.agent_ref(agent)?)?;
        let time = self.rng.next_time(self.clock.now(), rate)?;
        Ok(self.queue.push(time, agent))
    }

    #[cfg(test)]
    pub(crate) fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    fn pop_earliest(&mut self) -> TrackResult<ScheduledEvent> {
        self.queue.pop().ok_or(TrackError::EmptyQueue(self.id))
    }

    /// Drop a detached agent from the roster and queue and report it.
    fn retire(&mut self, id: AgentId, time: SimTime) -> TrackResult<()> {
        let mut agent = self.agents.remove(&id).ok_or_else(|| self.unknown_agent(id))?;
        agent.detach();
        let dropped = self.queue.remove(id);
        if dropped != 0 {
            return Err(TrackError::IllegalState(format!(
                "retired {id} still had {dropped} queued event(s)"
            )));
        }
        debug!(track = %self.name, %id, agent = agent.name(), %time, "retire");
        let track = TrackRef { id: self.id, name: &self.name, time };
        self.observers.notify(&track, agent.name(), Action::Terminate);
        Ok(())
    }

    fn agent_ref(&self, id: AgentId) -> TrackResult<&dyn MovingAgent> {
        self.agent(id).ok_or_else(|| self.unknown_agent(id))
    }

    fn unknown_agent(&self, id: AgentId) -> TrackError {
        TrackError::IllegalState(format!("{id} is not bound to {}", self.name))
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> Position {
        self.length
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Time of the earliest queued event, or `None` if quiescent.
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.queue.next_time()
    }

    /// No events left to execute.
    pub fn is_quiescent(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queued_events(&self) -> usize {
        self.queue.len()
    }

    /// Number of queued events for `agent` (1 while bound, 0 once retired).
    pub fn queued_events_for(&self, agent: AgentId) -> usize {
        self.queue.count_for(agent)
    }

    /// Number of bound agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agent(&self, id: AgentId) -> Option<&dyn MovingAgent> {
        self.agents.get(&id).map(|a| a.as_ref())
    }

    /// Bound agents in bind order.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &dyn MovingAgent)> + '_ {
        self.agents.iter().map(|(&id, a)| (id, a.as_ref()))
    }

    pub fn annotation(&self, id: SiteId) -> Option<&dyn FixedAnnotation> {
        self.annotations.get(id.index()).map(|s| s.as_ref())
    }

    /// Free (uncovered) annotations named `name`.
    pub fn uncovered(&self, name: &str) -> usize {
        self.uncovered.get(name).copied().unwrap_or(0)
    }

    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn annotations(&self) -> impl Iterator<Item = (SiteId, &dyn FixedAnnotation)> + '_ {
        self.annotations
            .iter()
            .enumerate()
            .map(|(i, s)| (SiteId(i as u32), s.as_ref()))
    }

    /// One character per position: `1` where an agent sits, `0` elsewhere.
    pub fn occupancy(&self) -> String {
        let mut cells = vec![b'0'; self.length as usize];
        for agent in self.agents.values() {
            let iv = agent.interval();
            for pos in iv.start..=iv.stop.min(self.length) {
                cells[(pos - 1) as usize] = b'1';
            }
        }
        cells.into_iter().map(char::from).collect()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.clock.now(), self.occupancy())
    }
}
