//! `pt-track` — the single-track event engine.
//!
//! # Step cycle
//!
//! ```text
//! step():
//!   ① Pop       — earliest (time, agent) from the EventQueue (EmptyQueue if none).
//!   ② Advance   — before-cover → translocate → agent collisions
//!                 → mask (push back or blocked) → newly covered sites
//!                 (cover + react) → left sites (uncover unless another
//!                 agent holds them, then "free_promoter").
//!   ③ Clock     — shared clock set to the popped time (never to "now").
//!   ④ Reschedule or retire
//!               — attached: redraw an exponential waiting time and push;
//!                 detached: drop from the roster, emit "terminate".
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`track`]    | `Track`, `StepOutcome`                                        |
//! | [`builder`]  | `TrackBuilder`                                                |
//! | [`resolver`] | overlap queries for sites and agents, set differences         |
//! | [`observer`] | `TrackObserver`, `Action`, `TrackRef`, registry, `NotificationLog` |
//! | [`error`]    | `TrackError`, `TrackResult<T>`                                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pt_core::{SharedClock, TrackId, TrackRng};
//! use pt_element::{BindingSite, Polymerase};
//! use pt_track::TrackBuilder;
//!
//! let clock = SharedClock::new();
//! let mut track = TrackBuilder::new("genome", 50)
//!     .annotation(BindingSite::new("p1", 1, 10, [("pol", 1.0)])?)
//!     .build(TrackId(0), clock.clone(), TrackRng::from_seed(42))?;
//! track.bind(Box::new(Polymerase::new("pol", 1, 10, 2.0)?))?;
//! while !track.is_quiescent() {
//!     track.step()?;
//! }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod resolver;
pub mod track;


pub use builder::TrackBuilder;
pub use error::{TrackError, TrackResult};
pub use observer::{Action, Notification, NotificationLog, ObserverRegistry, TrackObserver, TrackRef};
pub use track::{StepOutcome, Track};
