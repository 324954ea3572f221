use pt_core::Position;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ElementError {
    #[error("invalid interval [{start}, {stop}]: positions are 1-based and start must not exceed stop")]
    InvalidInterval { start: Position, stop: Position },

    #[error("{name}: speed must be finite and > 0, got {speed}")]
    InvalidSpeed { name: String, speed: f64 },

    #[error("affinity for {species} must be finite and >= 0, got {value}")]
    InvalidAffinity { species: String, value: f64 },

    #[error("efficiency for {species} must lie in [0, 1], got {value}")]
    InvalidEfficiency { species: String, value: f64 },

    #[error("{0} cannot move below position 1")]
    MovePastOrigin(String),
}

pub type ElementResult<T> = Result<T, ElementError>;
