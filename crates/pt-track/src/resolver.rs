//! Collision and coverage queries.
//!
//! An element counts as interacting with an agent only when the intervals
//! overlap *and* the element accepts the agent's name.  Results come back in
//! ascending id order so reaction order is deterministic.

use std::collections::BTreeMap;

use pt_core::{AgentId, SiteId};
use pt_element::{FixedAnnotation, MovingAgent};

/// Does `agent` sit on `site` and interact with it?
#[inline]
pub fn covers(site: &dyn FixedAnnotation, agent: &dyn MovingAgent) -> bool {
    site.interval().overlaps(agent.interval()) && site.check_interaction(agent.name())
}

/// Sites overlapping `agent` that interact with it.
pub fn overlapping_sites(
    sites: &[Box<dyn FixedAnnotation>],
    agent: &dyn MovingAgent,
) -> Vec<SiteId> {
    sites
        .iter()
        .enumerate()
        .filter(|(_, site)| covers(site.as_ref(), agent))
        .map(|(i, _)| SiteId(i as u32))
        .collect()
}

/// Agents in `roster` overlapping `agent` that interact with it.
///
/// `agent` itself must not be in `roster`.
pub fn overlapping_agents(
    roster: &BTreeMap<AgentId, Box<dyn MovingAgent>>,
    agent:  &dyn MovingAgent,
) -> Vec<AgentId> {
    let footprint = agent.interval();
    roster
        .iter()
        .filter(|(_, other)| {
            other.interval().overlaps(footprint) && other.check_interaction(agent.name())
        })
        .map(|(&id, _)| id)
        .collect()
}

/// Elements of `after` that are not in `before`, in `after`'s order.
pub fn newly_entered<T: PartialEq + Copy>(before: &[T], after: &[T]) -> Vec<T> {
    after.iter().copied().filter(|x| !before.contains(x)).collect()
}

/// Elements of `before` that are not in `after`, in `before`'s order.
pub fn newly_left<T: PartialEq + Copy>(before: &[T], after: &[T]) -> Vec<T> {
    newly_entered(after, before)
}
