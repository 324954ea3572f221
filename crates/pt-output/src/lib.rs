//! `pt-output` — event log writers for polymer track runs.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`row`]      | `EventRow` — one notification, flattened                  |
//! | [`writer`]   | `EventWriter` trait implemented by every backend          |
//! | [`csv`]      | `CsvEventWriter` — `time,track,track_name,species,action` |
//! | [`observer`] | `EventOutputObserver` — a `TrackObserver` over a writer   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use pt_output::{CsvEventWriter, EventOutputObserver};
//!
//! let log = EventOutputObserver::shared(CsvEventWriter::new(Path::new("events.csv"))?);
//! let id = sim.add_track(TrackBuilder::new("genome", 500).observer(log.clone()))?;
//! sim.run()?;
//! log.borrow_mut().finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvEventWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventOutputObserver;
pub use row::EventRow;
pub use writer::EventWriter;
