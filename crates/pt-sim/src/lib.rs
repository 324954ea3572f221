//! `pt-sim` — drive several tracks against one shared clock.
//!
//! # Dispatch loop
//!
//! ```text
//! loop:
//!   ① Peek      — each track's next_event_time(); pick the global minimum
//!                 (ties → lowest TrackId).
//!   ② Stop?     — no events anywhere, next event past stop_time, or
//!                 max_steps reached.
//!   ③ Step      — Track::step on the chosen track only; it alone moves the
//!                 shared clock, to the event time.
//! ```
//!
//! A track never sees an event earlier than the clock because only the
//! global minimum is ever executed.
//!
//! # Cargo features
//!
//! | Feature  | Effect                                                    |
//! |----------|-----------------------------------------------------------|
//! | `serde`  | `Serialize`/`Deserialize` on `SimConfig`.                 |
//! | `fx-hash`| FxHash for `SpeciesTracker` count maps.                   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut sim = Simulation::new(SimConfig { seed: 42, stop_time: 100.0, max_steps: None })?;
//! let genome = sim.add_track(TrackBuilder::new("genome", 500).annotation(promoter))?;
//! sim.bind(genome, Box::new(Polymerase::new("rnapol", 1, 10, 40.0)?))?;
//! let summary = sim.run()?;
//! ```

pub mod config;
pub mod error;
pub mod sim;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use sim::{RunSummary, Simulation, StopReason};
pub use tracker::SpeciesTracker;
