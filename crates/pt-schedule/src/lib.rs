//! `pt-schedule` — the per-track event queue.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`event_queue`] | `ScheduledEvent`, `EventQueue` (min-heap on time, then seq) |
//!
//! # Ordering model (summary)
//!
//! Events are totally ordered by `(time, seq)` where `seq` is a counter the
//! queue assigns on every push.  Two events at exactly the same time fire
//! in insertion order, whatever the heap implementation does internally.

pub mod event_queue;


pub use event_queue::{EventQueue, ScheduledEvent};
