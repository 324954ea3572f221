//! Track observers: who gets told when a site is freed or an agent retires.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use pt_core::{SimTime, TrackId};

/// What happened to `species`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    /// A site stopped being covered by the agent that just moved.
    FreePromoter,
    /// A moving agent detached and left the track.
    Terminate,
}

impl Action {
    /// Stable wire name, as written to logs and output files.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::FreePromoter => "free_promoter",
            Action::Terminate => "terminate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of the notifying track.
#[derive(Copy, Clone, Debug)]
pub struct TrackRef<'a> {
    pub id:   TrackId,
    pub name: &'a str,
    /// Time of the event being executed.
    pub time: SimTime,
}

/// Callback invoked synchronously by a [`Track`][crate::Track] for every
/// coverage loss and retirement.
///
/// Observers never own the track.  To read an observer's state after
/// registering it, register an `Rc<RefCell<O>>` and keep a clone.
pub trait TrackObserver {
    fn notify(&mut self, track: &TrackRef<'_>, species: &str, action: Action);
}

impl<O: TrackObserver + ?Sized> TrackObserver for Rc<RefCell<O>> {
    fn notify(&mut self, track: &TrackRef<'_>, species: &str, action: Action) {
        self.borrow_mut().notify(track, species, action);
    }
}

// ── ObserverRegistry ──────────────────────────────────────────────────────────

/// Observers of one track, notified in registration order.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn TrackObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Box<dyn TrackObserver>) {
        self.observers.push(observer);
    }

    pub fn notify(&mut self, track: &TrackRef<'_>, species: &str, action: Action) {
        for observer in &mut self.observers {
            observer.notify(track, species, action);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

// ── NotificationLog ───────────────────────────────────────────────────────────

/// One recorded notification.
#[derive(Clone, PartialEq, Debug)]
pub struct Notification {
    pub track:   TrackId,
    pub time:    SimTime,
    pub species: String,
    pub action:  Action,
}

/// An observer that keeps every notification in memory.
#[derive(Default, Debug)]
pub struct NotificationLog {
    pub entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle, ready to register while keeping a clone to read.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// How many notifications match `species` and `action`.
    pub fn count(&self, species: &str, action: Action) -> usize {
        self.entries
            .iter()
            .filter(|n| n.species == species && n.action == action)
            .count()
    }
}

impl TrackObserver for NotificationLog {
    fn notify(&mut self, track: &TrackRef<'_>, species: &str, action: Action) {
        self.entries.push(Notification {
            track: track.id,
            time: track.time,
            species: species.to_owned(),
            action,
        });
    }
}
