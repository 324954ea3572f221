//! Deterministic per-track RNG and the exponential waiting-time draw.
//!
//! # Determinism strategy
//!
//! Each track gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (track_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive track IDs across the seed space.  Adding a track
//! does not disturb the streams of existing tracks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

use crate::{CoreError, CoreResult, SimTime, TrackId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Absolute time of the next reaction for something firing at `rate` per
/// unit time, given the clock reads `now`.
///
/// The exponential distribution is memoryless, so redrawing after every
/// event is equivalent to continuing one process.  No state is kept between
/// calls: the result depends only on `now`, `rate` and the RNG stream.
pub fn next_reaction_time<R: Rng + ?Sized>(
    now:  SimTime,
    rate: f64,
    rng:  &mut R,
) -> CoreResult<SimTime> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CoreError::InvalidRate(rate));
    }
    let exp = Exp::new(rate).map_err(|_| CoreError::InvalidRate(rate))?;
    Ok(now.after(exp.sample(rng)))
}

// ── TrackRng ──────────────────────────────────────────────────────────────────

/// Per-track deterministic RNG.
///
/// Drives both waiting-time draws and stochastic reactions (terminator
/// efficiency) so a seeded run is reproducible end to end.
pub struct TrackRng(SmallRng);

impl TrackRng {
    /// Seed deterministically from the run's global seed and a track ID.
    pub fn new(global_seed: u64, track: TrackId) -> Self {
        let seed = global_seed ^ (track.0 as u64).wrapping_mul(MIXING_CONSTANT);
        TrackRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed directly, for standalone tracks and tests.
    pub fn from_seed(seed: u64) -> Self {
        TrackRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw the absolute time of the next reaction at `rate`.
    #[inline]
    pub fn next_time(&mut self, now: SimTime, rate: f64) -> CoreResult<SimTime> {
        next_reaction_time(now, rate, &mut self.0)
    }

    /// A uniformly chosen index into a collection of `len` items, or `None`
    /// if the collection is empty.
    #[inline]
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
