//! Plain data row types written by output backends.

use pt_core::{SimTime, TrackId};
use pt_track::{Action, TrackRef};

/// One observer notification, detached from the track that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub time:       SimTime,
    pub track:      TrackId,
    pub track_name: String,
    pub species:    String,
    pub action:     Action,
}

impl EventRow {
    pub fn new(track: &TrackRef<'_>, species: &str, action: Action) -> Self {
        Self {
            time:       track.time,
            track:      track.id,
            track_name: track.name.to_owned(),
            species:    species.to_owned(),
            action,
        }
    }
}
