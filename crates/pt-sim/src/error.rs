use pt_core::TrackId;
use pt_track::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{0} is not registered with this simulation")]
    UnknownTrack(TrackId),

    #[error("track error: {0}")]
    Track(#[from] TrackError),
}

pub type SimResult<T> = Result<T, SimError>;
