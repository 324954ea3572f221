//! The `Simulation` struct and its dispatch loop.

use pt_core::{AgentId, SharedClock, SimTime, TrackId, TrackRng};
use pt_element::MovingAgent;
use pt_track::{StepOutcome, Track, TrackBuilder};
use tracing::{debug, info};

use crate::{SimConfig, SimError, SimResult};

/// Why [`Simulation::run`] returned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StopReason {
    /// No track has any scheduled event.
    Quiescent,
    /// The next event lies beyond `config.stop_time`.
    StopTime,
    /// `config.max_steps` events were executed.
    MaxSteps,
}

/// Result of one [`Simulation::run`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RunSummary {
    /// Events executed during this run.
    pub steps:  u64,
    /// Shared clock reading when the run stopped.
    pub time:   SimTime,
    pub reason: StopReason,
}

/// Owns the shared clock and every track reading it, and always executes
/// the globally earliest event.
pub struct Simulation {
    config: SimConfig,
    clock:  SharedClock,
    tracks: Vec<Track>,
    /// Events executed since construction.
    steps:  u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: SharedClock::new(),
            tracks: Vec::new(),
            steps: 0,
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Build a track from `builder` on this simulation's clock, with an RNG
    /// derived from the master seed and the new track's id.
    pub fn add_track(&mut self, builder: TrackBuilder) -> SimResult<TrackId> {
        let id = u16::try_from(self.tracks.len())
            .map(TrackId)
            .map_err(|_| SimError::Config("too many tracks".into()))?;
        let rng = TrackRng::new(self.config.seed, id);
        let track = builder.build(id, self.clock.clone(), rng)?;
        debug!(%id, name = track.name(), length = track.length(), "add track");
        self.tracks.push(track);
        Ok(id)
    }

    /// Bind `agent` to `track`.
    pub fn bind(&mut self, track: TrackId, agent: Box<dyn MovingAgent>) -> SimResult<AgentId> {
        Ok(self.track_mut(track)?.bind(agent)?)
    }

    /// Bind `agent` to a free promoter named `promoter` on `track`.
    pub fn bind_to_promoter(
        &mut self,
        track:    TrackId,
        agent:    Box<dyn MovingAgent>,
        promoter: &str,
    ) -> SimResult<AgentId> {
        Ok(self.track_mut(track)?.bind_to_promoter(agent, promoter)?)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// The track holding the globally earliest event, and that event's time.
    pub fn next_event(&self) -> Option<(TrackId, SimTime)> {
        let mut best: Option<(TrackId, SimTime)> = None;
        for track in &self.tracks {
            if let Some(t) = track.next_event_time() {
                if best.is_none_or(|(_, b)| t < b) {
                    best = Some((track.id(), t));
                }
            }
        }
        best
    }

    /// Execute the globally earliest event.  `None` if every track is
    /// quiescent.
    pub fn step(&mut self) -> SimResult<Option<(TrackId, StepOutcome)>> {
        let Some((id, _)) = self.next_event() else {
            return Ok(None);
        };
        let outcome = self.track_mut(id)?.step()?;
        self.steps += 1;
        Ok(Some((id, outcome)))
    }

    /// Step until quiescence, `stop_time`, or `max_steps`.
    ///
    /// The clock is left at the last executed event, never advanced to
    /// `stop_time` itself.
    pub fn run(&mut self) -> SimResult<RunSummary> {
        info!(
            seed = self.config.seed,
            stop_time = self.config.stop_time,
            tracks = self.tracks.len(),
            "simulation start"
        );
        let stop = self.config.stop();
        let mut steps = 0u64;

        let reason = loop {
            if self.config.max_steps.is_some_and(|max| self.steps >= max) {
                break StopReason::MaxSteps;
            }
            match self.next_event() {
                None => break StopReason::Quiescent,
                Some((_, t)) if t > stop => break StopReason::StopTime,
                Some(_) => {
                    self.step()?;
                    steps += 1;
                }
            }
        };

        let summary = RunSummary { steps, time: self.clock.now(), reason };
        info!(steps, time = %summary.time, ?reason, "simulation stop");
        Ok(summary)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn time(&self) -> SimTime {
        self.clock.now()
    }

    /// Events executed since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn track(&self, id: TrackId) -> SimResult<&Track> {
        self.tracks.get(id.index()).ok_or(SimError::UnknownTrack(id))
    }

    pub fn track_mut(&mut self, id: TrackId) -> SimResult<&mut Track> {
        self.tracks.get_mut(id.index()).ok_or(SimError::UnknownTrack(id))
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
