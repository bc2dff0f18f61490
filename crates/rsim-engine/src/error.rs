use rsim_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("route has {points} point(s); at least 2 are needed to simulate")]
    EmptyRoute { points: usize },

    #[error("no fixed position is being held")]
    NotHolding,

    #[error("simulation worker failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
