//! Fluent builder for constructing a [`Track`].

use pt_core::{Position, SharedClock, TrackId, TrackRng};
use pt_element::{FixedAnnotation, Mask};

use crate::{Track, TrackObserver, TrackResult};

/// Fluent builder for [`Track`].
///
/// # Example
///
/// ```rust,ignore
/// let track = TrackBuilder::new("genome", 500)
///     .annotation(BindingSite::new("phi1", 1, 10, [("rnapol", 2e8)])?)
///     .annotation(ReleaseSite::new("t1", 480, 490, [("rnapol", 1.0)])?)
///     .mask(Mask::new(200, 500, ["rnapol"])?)
///     .observer(log.clone())
///     .build(TrackId(0), clock.clone(), TrackRng::new(seed, TrackId(0)))?;
/// ```
pub struct TrackBuilder {
    name:        String,
    length:      Position,
    annotations: Vec<Box<dyn FixedAnnotation>>,
    observers:   Vec<Box<dyn TrackObserver>>,
    mask:        Option<Mask>,
    weights:     Option<Vec<f64>>,
}

impl TrackBuilder {
    pub fn new(name: impl Into<String>, length: Position) -> Self {
        Self {
            name: name.into(),
            length,
            annotations: Vec::new(),
            observers: Vec::new(),
            mask: None,
            weights: None,
        }
    }

    /// Add a fixed annotation.  Bounds are checked in [`build`](Self::build).
    pub fn annotation<A: FixedAnnotation + 'static>(mut self, site: A) -> Self {
        self.annotations.push(Box::new(site));
        self
    }

    /// Hide the tail of the track behind a receding mask.
    pub fn mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// One rate multiplier per position.
    pub fn weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn observer<O: TrackObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Validate and return an empty-roster [`Track`].
    pub fn build(self, id: TrackId, clock: SharedClock, rng: TrackRng) -> TrackResult<Track> {
        let mut track = Track::new(id, self.name, self.length, clock, rng)?;
        for site in self.annotations {
            track.add_annotation(site)?;
        }
        if let Some(mask) = self.mask {
            track.set_mask(mask)?;
        }
        if let Some(weights) = self.weights {
            track.set_weights(weights)?;
        }
        for observer in self.observers {
            track.register_observer(observer);
        }
        Ok(track)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
