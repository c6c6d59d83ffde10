use std::error::Error;
use std::fmt;

pub type ChessResult<T> = Result<T, ChessError>;

/// Failures raised at the boundary between caller input and the engine.
///
/// The search core itself cannot fail; these variants describe malformed
/// text handed to the rules layer, plus the sampler refusing its weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The FEN text could not be parsed or describes an impossible setup.
    InvalidPosition(String),
    /// The UCI move text is malformed or not legal in the current position.
    InvalidMove(String),
    /// Weighted sampling rejected the candidate weights.
    Sampling(String),
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::InvalidPosition(msg) => write!(f, "invalid position: {msg}"),
            ChessError::InvalidMove(msg) => write!(f, "invalid move: {msg}"),
            ChessError::Sampling(msg) => write!(f, "weighted sampling failed: {msg}"),
        }
    }
}

impl Error for ChessError {}
