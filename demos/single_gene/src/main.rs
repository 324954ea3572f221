//! single_gene — polymerases transcribing a toy genome and a plasmid.
//!
//! Four RNA polymerases start on a 500-position genome, one of them bound
//! at the `phi1` promoter, and run until the end terminator releases them;
//! a leaky terminator midway lets some read through.  The last 100
//! positions start masked and are pushed open by the leading polymerase,
//! exposing a second promoter.  A 200-position plasmid track with a slow
//! stretch in the middle runs on the same clock.  Every notification is
//! logged to `output/single_gene/events.csv`.
//!
//! Set `RUST_LOG=pt_track=debug` to watch binds and retirements.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pt_element::{BindingSite, Mask, Polymerase, ReleaseSite};
use pt_output::{CsvEventWriter, EventOutputObserver};
use pt_sim::{SimConfig, Simulation, SpeciesTracker};
use pt_track::TrackBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64 = 42;
const POLYMERASE:    &str = "rnapol";
const POOL:          i64 = 10;
const SPEED:         f64 = 40.0; // positions per unit time
const FOOTPRINT:     u32 = 10;
const GENOME_STARTS: [u32; 3] = [60, 120, 180];
const PLASMID_LEN:   u32 = 200;
const SLOW_STRETCH:  std::ops::RangeInclusive<u32> = 80..=120;

fn polymerase(start: u32) -> Result<Box<Polymerase>> {
    Ok(Box::new(Polymerase::new(POLYMERASE, start, start + FOOTPRINT - 1, SPEED)?))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== single_gene — polymer track engine ===");
    println!("Polymerases: {}  |  Speed: {SPEED}  |  Seed: {SEED}", GENOME_STARTS.len() + 2);
    println!();

    // 1. Observers shared by both tracks.
    let tracker = SpeciesTracker::shared();
    tracker.borrow_mut().increment(POLYMERASE, POOL);

    std::fs::create_dir_all("output/single_gene")?;
    let log = EventOutputObserver::shared(CsvEventWriter::new(Path::new(
        "output/single_gene/events.csv",
    ))?);

    // 2. Tracks.
    let genome = TrackBuilder::new("genome", 500)
        .annotation(BindingSite::new("phi1", 1, 10, [(POLYMERASE, 2.0e8)])?)
        .annotation(ReleaseSite::new("t_mid", 300, 310, [(POLYMERASE, 0.6)])?)
        .annotation(BindingSite::new("phi2", 420, 430, [(POLYMERASE, 2.0e8)])?)
        .annotation(ReleaseSite::new("t_end", 480, 490, [(POLYMERASE, 1.0)])?)
        .mask(Mask::new(400, 500, [POLYMERASE])?)
        .observer(tracker.clone())
        .observer(log.clone());

    let weights = (1..=PLASMID_LEN)
        .map(|pos| if SLOW_STRETCH.contains(&pos) { 0.25 } else { 1.0 })
        .collect();
    let plasmid = TrackBuilder::new("plasmid", PLASMID_LEN)
        .annotation(BindingSite::new("phi10", 1, 10, [(POLYMERASE, 2.0e8)])?)
        .annotation(ReleaseSite::new("t_plasmid", 150, 160, [(POLYMERASE, 1.0)])?)
        .weights(weights)
        .observer(tracker.clone())
        .observer(log.clone());

    let mut sim = Simulation::new(SimConfig { seed: SEED, ..SimConfig::default() })?;
    let genome = sim.add_track(genome)?;
    let plasmid = sim.add_track(plasmid)?;

    // 3. Bind polymerases, drawing each from the free pool.
    sim.bind_to_promoter(genome, polymerase(1)?, "phi1")?;
    tracker.borrow_mut().increment(POLYMERASE, -1);
    for start in GENOME_STARTS {
        sim.bind(genome, polymerase(start)?)?;
        tracker.borrow_mut().increment(POLYMERASE, -1);
    }
    sim.bind_to_promoter(plasmid, polymerase(1)?, "phi10")?;
    tracker.borrow_mut().increment(POLYMERASE, -1);

    for track in sim.tracks() {
        println!("{track}");
    }
    println!();

    // 4. Run.
    let t0 = Instant::now();
    let summary = sim.run()?;
    let elapsed = t0.elapsed();

    let mut log = log.borrow_mut();
    log.finish()?;

    // 5. Summary.
    println!("Simulation complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("  events executed : {}", summary.steps);
    println!("  final time      : {}", summary.time);
    println!("  stopped because : {:?}", summary.reason);
    println!("  events.csv      : {} rows", log.writer().rows());
    println!();

    for track in sim.tracks() {
        let free: Vec<String> = ["phi1", "phi2", "phi10"]
            .iter()
            .map(|p| format!("{p}={}", track.uncovered(p)))
            .collect();
        println!("{:<8} free promoters: {}", track.name(), free.join(" "));
    }
    println!();

    let tracker = tracker.borrow();
    println!("{:<12} {:>6} {:>12}", "Species", "Free", "Terminated");
    println!("{}", "-".repeat(32));
    for (species, count) in tracker.snapshot() {
        println!("{:<12} {:>6} {:>12}", species, count, tracker.terminations(&species));
    }

    Ok(())
}
