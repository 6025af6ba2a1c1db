use thiserror::Error;

use crate::{Picture, Player, Resolution};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Picture pool has {available} pictures but a board needs {required}")]
    PoolTooSmall { available: usize, required: usize },
    #[error("A board needs exactly {required} pictures, got {actual}")]
    InvalidBoardSize { required: usize, actual: usize },
    #[error("{0} appears more than once on the board")]
    DuplicatePicture(Picture),
    #[error("{0} cannot be rolled at this difficulty")]
    PictureNotInPool(Picture),
    #[error("Die value {0} is outside 1..=6")]
    InvalidDie(u8),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("It's {active}'s turn")]
    NotYourTurn { active: Player },
    #[error("{0} must cover or pass before rolling again")]
    DecisionPending(Player),
    #[error("{0} has no roll waiting for a decision")]
    NoPendingDecision(Player),
    #[error("This roll is waiting for {expected}")]
    WrongDecision { expected: Resolution },
    #[error("The roll was for {expected}, not {requested}")]
    PictureMismatch {
        expected: Picture,
        requested: Picture,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
