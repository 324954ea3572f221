//! Tests for pt-sim.

use std::cell::RefCell;
use std::rc::Rc;

use pt_core::{SimTime, TrackId};
use pt_element::{BindingSite, MovingAgent, Polymerase, ReleaseSite};
use pt_track::{Action, TrackBuilder, TrackObserver, TrackRef};

use crate::{SimConfig, SimError, Simulation, SpeciesTracker, StopReason};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(seed: u64) -> SimConfig {
    SimConfig { seed, ..SimConfig::default() }
}

/// 100-position gene: promoter p [1, 10], terminator t1 [50, 55].
fn gene(name: &str, tracker: &Rc<RefCell<SpeciesTracker>>) -> TrackBuilder {
    TrackBuilder::new(name, 100)
        .annotation(BindingSite::new("p", 1, 10, [("pol", 1.0)]).unwrap())
        .annotation(ReleaseSite::new("t1", 50, 55, [("pol", 1.0)]).unwrap())
        .observer(tracker.clone())
}

fn two_gene_sim(seed: u64, tracker: &Rc<RefCell<SpeciesTracker>>) -> Simulation {
    let mut sim = Simulation::new(config(seed)).unwrap();
    let a = sim.add_track(gene("geneA", tracker)).unwrap();
    let b = sim.add_track(gene("geneB", tracker)).unwrap();
    sim.bind(a, Box::new(Polymerase::new("pol", 1, 10, 2.0).unwrap())).unwrap();
    sim.bind(b, Box::new(Polymerase::new("pol", 1, 10, 5.0).unwrap())).unwrap();
    sim
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn bad_stop_time_rejected() {
        let c = SimConfig { stop_time: -1.0, ..SimConfig::default() };
        assert!(matches!(c.validate(), Err(SimError::Config(_))));
        let c = SimConfig { stop_time: f64::NAN, ..SimConfig::default() };
        assert!(Simulation::new(c).is_err());
    }

    #[test]
    fn zero_max_steps_rejected() {
        let c = SimConfig { max_steps: Some(0), ..SimConfig::default() };
        assert!(c.validate().is_err());
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn track_ids_are_sequential() {
        let tracker = SpeciesTracker::shared();
        let mut sim = two_gene_sim(1, &tracker);
        let ids: Vec<TrackId> = sim.tracks().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![TrackId(0), TrackId(1)]);

        // Every track reads the simulation's clock.
        sim.step().unwrap();
        assert!(sim.time() > SimTime::ZERO);
        assert!(sim.tracks().iter().all(|t| t.clock().now() == sim.time()));
    }

    #[test]
    fn always_steps_the_global_minimum() {
        let tracker = SpeciesTracker::shared();
        let mut sim = two_gene_sim(2, &tracker);
        let mut last = sim.time();
        for _ in 0..40 {
            let expected = sim.next_event().unwrap();
            let earliest = sim
                .tracks()
                .iter()
                .filter_map(|t| t.next_event_time())
                .min()
                .unwrap();
            assert_eq!(expected.1, earliest);

            let (id, outcome) = sim.step().unwrap().unwrap();
            assert_eq!(id, expected.0);
            assert_eq!(outcome.time(), expected.1);
            assert_eq!(sim.time(), expected.1);
            assert!(sim.time() >= last);
            last = sim.time();
        }
    }

    #[test]
    fn step_on_quiescent_simulation_is_none() {
        let mut sim = Simulation::new(config(0)).unwrap();
        sim.add_track(TrackBuilder::new("empty", 10)).unwrap();
        assert!(sim.step().unwrap().is_none());
        assert_eq!(sim.time(), SimTime::ZERO);
    }

    #[test]
    fn unknown_track_rejected() {
        let mut sim = Simulation::new(config(0)).unwrap();
        let r = sim.bind(TrackId(3), Box::new(Polymerase::new("pol", 1, 10, 1.0).unwrap()));
        assert!(matches!(r, Err(SimError::UnknownTrack(TrackId(3)))));
    }

    #[test]
    fn binds_to_promoter_on_the_named_track() {
        let tracker = SpeciesTracker::shared();
        let mut sim = Simulation::new(config(0)).unwrap();
        let a = sim.add_track(gene("geneA", &tracker)).unwrap();
        let b = sim.add_track(gene("geneB", &tracker)).unwrap();
        sim.bind_to_promoter(b, Box::new(Polymerase::new("pol", 30, 39, 1.0).unwrap()), "p").unwrap();

        assert!(sim.tracks()[a.index()].is_empty());
        let track = &sim.tracks()[b.index()];
        assert_eq!(track.len(), 1);
        assert!(track.agents().all(|(_, agent)| agent.start() == 1));
        assert_eq!(track.uncovered("p"), 0);

        let r = sim.bind_to_promoter(b, Box::new(Polymerase::new("pol", 1, 10, 1.0).unwrap()), "p");
        assert!(matches!(r, Err(SimError::Track(_))));
    }

    #[test]
    fn track_errors_surface() {
        let mut sim = Simulation::new(config(0)).unwrap();
        let id = sim.add_track(TrackBuilder::new("short", 5)).unwrap();
        let r = sim.bind(id, Box::new(Polymerase::new("pol", 1, 10, 1.0).unwrap()));
        assert!(matches!(r, Err(SimError::Track(_))));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use super::*;

    #[test]
    fn runs_to_quiescence() {
        let tracker = SpeciesTracker::shared();
        let mut sim = two_gene_sim(3, &tracker);
        let summary = sim.run().unwrap();

        // Each polymerase needs 40 moves to reach the terminator at 50.
        assert_eq!(summary.reason, StopReason::Quiescent);
        assert_eq!(summary.steps, 80);
        assert_eq!(sim.steps(), 80);
        assert!(sim.tracks().iter().all(|t| t.is_empty() && t.is_quiescent()));

        let tracker = tracker.borrow();
        assert_eq!(tracker.count("p"), 2);
        assert_eq!(tracker.count("pol"), 2);
        assert_eq!(tracker.terminations("pol"), 2);
    }

    #[test]
    fn stops_before_stop_time() {
        let tracker = SpeciesTracker::shared();
        let mut sim = Simulation::new(SimConfig { seed: 4, stop_time: 3.0, max_steps: None }).unwrap();
        let id = sim.add_track(gene("gene", &tracker)).unwrap();
        sim.bind(id, Box::new(Polymerase::new("pol", 1, 10, 1.0).unwrap())).unwrap();

        let summary = sim.run().unwrap();
        assert_eq!(summary.reason, StopReason::StopTime);
        assert!(summary.time <= SimTime(3.0));
        assert!(sim.next_event().unwrap().1 > SimTime(3.0));
    }

    #[test]
    fn stops_at_max_steps() {
        let tracker = SpeciesTracker::shared();
        let mut sim = two_gene_sim(5, &tracker);
        let mut sim_config = sim.config().clone();
        sim_config.max_steps = Some(5);
        let mut capped = Simulation::new(sim_config).unwrap();
        capped.add_track(gene("gene", &tracker)).unwrap();
        capped
            .bind(TrackId(0), Box::new(Polymerase::new("pol", 1, 10, 1.0).unwrap()))
            .unwrap();

        let summary = capped.run().unwrap();
        assert_eq!(summary.reason, StopReason::MaxSteps);
        assert_eq!(summary.steps, 5);

        // The uncapped simulation is unaffected.
        assert_eq!(sim.run().unwrap().reason, StopReason::Quiescent);
    }

    #[test]
    fn same_seed_same_run() {
        let t1 = SpeciesTracker::shared();
        let t2 = SpeciesTracker::shared();
        let a = two_gene_sim(6, &t1).run().unwrap();
        let b = two_gene_sim(6, &t2).run().unwrap();
        assert_eq!(a, b);
    }
}

// ── SpeciesTracker ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tracker {
    use super::*;

    #[test]
    fn notifications_add_free_copies() {
        let mut tracker = SpeciesTracker::new();
        let track = TrackRef { id: TrackId(0), name: "g", time: SimTime(1.0) };
        tracker.notify(&track, "p1", Action::FreePromoter);
        tracker.notify(&track, "p1", Action::FreePromoter);
        tracker.notify(&track, "rnapol", Action::Terminate);
        assert_eq!(tracker.count("p1"), 2);
        assert_eq!(tracker.count("rnapol"), 1);
        assert_eq!(tracker.terminations("rnapol"), 1);
        assert_eq!(tracker.terminations("p1"), 0);
        assert_eq!(tracker.count("unknown"), 0);
    }

    #[test]
    fn increment_and_snapshot() {
        let mut tracker = SpeciesTracker::new();
        tracker.increment("rnapol", 10);
        tracker.increment("rnapol", -3);
        tracker.increment("ecolipol", 1);
        assert_eq!(
            tracker.snapshot(),
            vec![("ecolipol".to_string(), 1), ("rnapol".to_string(), 7)]
        );
    }
}
