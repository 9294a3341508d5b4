use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Swapped cells are not adjacent")]
    InvalidSwap,
    #[error("Board is still resolving, input dropped")]
    Busy,
    #[error("No uses of this action remain")]
    BudgetExhausted,
    #[error("Round is already over, no new moves are accepted")]
    RoundOver,
    #[error("Round has not ended yet")]
    RoundActive,
    #[error("No username available for score submission")]
    MissingIdentity,
    #[error("Score submission failed")]
    SubmissionFailed,
}

pub type Result<T> = core::result::Result<T, GameError>;
