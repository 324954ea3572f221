//! Run configuration.

use pt_core::SimTime;

use crate::{SimError, SimResult};

/// Top-level simulation configuration.
///
/// Typically built in code or deserialized by the application crate (enable
/// the `serde` feature) and passed to [`Simulation::new`][crate::Simulation::new].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Events scheduled after this time are not executed.
    pub stop_time: f64,

    /// Optional hard cap on executed events.
    pub max_steps: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:      0,
            stop_time: f64::INFINITY,
            max_steps: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.stop_time.is_nan() || self.stop_time < 0.0 {
            return Err(SimError::Config(format!(
                "stop_time must be >= 0, got {}",
                self.stop_time
            )));
        }
        if self.max_steps == Some(0) {
            return Err(SimError::Config("max_steps must be > 0 when set".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn stop(&self) -> SimTime {
        SimTime(self.stop_time)
    }
}
