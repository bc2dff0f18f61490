use thiserror::Error;

/// Malformed polyline input.
///
/// `offset` is the byte offset into the encoded string at which decoding
/// had to stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolylineError {
    #[error("polyline truncated inside a value at byte {offset}")]
    Truncated { offset: usize },

    #[error("invalid polyline character {ch:?} at byte {offset}")]
    InvalidChar { offset: usize, ch: char },

    #[error("polyline value starting at byte {offset} overflows 64 bits")]
    Overflow { offset: usize },
}

pub type PolylineResult<T> = Result<T, PolylineError>;
