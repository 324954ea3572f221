//! `SpeciesTracker` — free species counts fed by track notifications.

use std::cell::RefCell;
use std::rc::Rc;

use pt_track::{Action, TrackObserver, TrackRef};

#[cfg(feature = "fx-hash")]
type CountMap = rustc_hash::FxHashMap<String, i64>;
#[cfg(not(feature = "fx-hash"))]
type CountMap = std::collections::HashMap<String, i64>;

/// Counts free copies of each species across every track it observes.
///
/// A freed promoter and a terminated agent each return one free copy of
/// that species.  Callers that consume a species (binding a polymerase to a
/// promoter) record it with a negative [`increment`](Self::increment).
#[derive(Default, Debug)]
pub struct SpeciesTracker {
    counts:       CountMap,
    terminations: CountMap,
}

impl SpeciesTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle, ready to register on several tracks.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Adjust the free count of `species` by `delta`.
    pub fn increment(&mut self, species: &str, delta: i64) {
        *self.counts.entry(species.to_owned()).or_insert(0) += delta;
    }

    /// Current free count of `species` (0 if never seen).
    pub fn count(&self, species: &str) -> i64 {
        self.counts.get(species).copied().unwrap_or(0)
    }

    /// How many agents named `species` have terminated.
    pub fn terminations(&self, species: &str) -> i64 {
        self.terminations.get(species).copied().unwrap_or(0)
    }

    /// All species with a recorded count, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, i64)> {
        let mut rows: Vec<(String, i64)> =
            self.counts.iter().map(|(k, &v)| (k.clone(), v)).collect();
        rows.sort();
        rows
    }
}

impl TrackObserver for SpeciesTracker {
    fn notify(&mut self, _track: &TrackRef<'_>, species: &str, action: Action) {
        self.increment(species, 1);
        if action == Action::Terminate {
            *self.terminations.entry(species.to_owned()).or_insert(0) += 1;
        }
    }
}
