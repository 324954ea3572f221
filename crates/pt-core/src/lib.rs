//! `pt-core` — foundational types for the polymer track engine.
//!
//! This crate is a dependency of every other `pt-*` crate.  It has no `pt-*`
//! dependencies and minimal external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `SiteId`, `TrackId`                        |
//! | [`interval`]    | `Interval`, `segments_intersect`                      |
//! | [`time`]        | `SimTime`, `SharedClock`                              |
//! | [`rng`]         | `TrackRng` (per-track), `next_reaction_time`          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, intervals and time. |

pub mod error;
pub mod ids;
pub mod interval;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, SiteId, TrackId};
pub use interval::{Interval, Position, segments_intersect};
pub use rng::{TrackRng, next_reaction_time};
pub use time::{SharedClock, SimTime};
