use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Room is full")]
    RoomFull,

    #[error("card index {index} is out of range for a hand of {hand_size}")]
    InvalidCardIndex { index: usize, hand_size: usize },

    #[error("Already in a room")]
    AlreadySeated,
}

pub type Result<T> = std::result::Result<T, GameError>;
