use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Slot index out of range")]
    OutOfRange,
    #[error("Tile rank out of range")]
    InvalidRank,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board flags contradict each other")]
    InconsistentState,
}

pub type Result<T> = core::result::Result<T, GameError>;
