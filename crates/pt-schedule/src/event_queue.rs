//! `EventQueue` — min-priority queue of `(time, agent)` events.
//!
//! # Why a sequence number
//!
//! Waiting times are continuous so exact ties are rare, but they do happen
//! (identical seeds, hand-built schedules).  Comparing the agent payload to
//! break them would make firing order depend on id allocation; the
//! insertion counter gives FIFO among equal times instead.
//!
//! # Performance note
//!
//! `BinaryHeap` gives O(log n) push and pop.  `remove` is O(n) and is only
//! used off the hot path.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use pt_core::{AgentId, SimTime};

/// One scheduled movement: `agent` moves at `time`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ScheduledEvent {
    pub time:  SimTime,
    /// Insertion order; secondary sort key.
    pub seq:   u64,
    pub agent: AgentId,
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A min-heap of [`ScheduledEvent`]s.
#[derive(Default, Debug)]
pub struct EventQueue {
    heap:     BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `agent` to fire at `time`.  Returns the stored event.
    pub fn push(&mut self, time: SimTime, agent: AgentId) -> ScheduledEvent {
        let event = ScheduledEvent { time, seq: self.next_seq, agent };
        self.next_seq += 1;
        self.heap.push(Reverse(event));
        event
    }

    /// Remove and return the earliest event, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<ScheduledEvent> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    /// The earliest event without removing it.
    pub fn peek(&self) -> Option<&ScheduledEvent> {
        self.heap.peek().map(|Reverse(e)| e)
    }

    /// Time of the earliest event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.peek().map(|e| e.time)
    }

    /// Drop every event for `agent`.  Returns how many were removed.
    pub fn remove(&mut self, agent: AgentId) -> usize {
        let before = self.heap.len();
        self.heap.retain(|Reverse(e)| e.agent != agent);
        before - self.heap.len()
    }

    /// Number of queued events for `agent`.
    pub fn count_for(&self, agent: AgentId) -> usize {
        self.heap.iter().filter(|Reverse(e)| e.agent == agent).count()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
