use pt_core::{CoreError, Interval, Position, TrackId};
use pt_element::ElementError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    /// Nothing left to step; the track is quiescent.
    #[error("{0} has no scheduled events")]
    EmptyQueue(TrackId),

    /// A scheduling invariant was broken.  Not recoverable locally.
    #[error("illegal track state: {0}")]
    IllegalState(String),

    #[error("track length must be > 0")]
    InvalidLength,

    #[error("{what} {interval} lies outside track positions 1..={length}")]
    OutOfBounds {
        what:     String,
        interval: Interval,
        length:   Position,
    },

    #[error("cannot bind detached agent {0}")]
    AlreadyDetached(String),

    #[error("{what} {interval} reaches into the mask starting at {mask_start}")]
    Masked {
        what:       String,
        interval:   Interval,
        mask_start: Position,
    },

    #[error("{agent} found no free promoter named {promoter}")]
    NoFreePromoter { agent: String, promoter: String },

    #[error("{agent} does not interact with {site}")]
    NoInteraction { agent: String, site: String },

    #[error("invalid position weights: {0}")]
    InvalidWeights(String),

    #[error("reaction failed: {0}")]
    Element(#[from] ElementError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TrackResult<T> = Result<T, TrackError>;
