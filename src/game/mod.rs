pub mod game_manager;
pub mod registry;
pub mod session;

pub use game_manager::{GameCommand, GameManager, RoomHandle};
pub use registry::{RoomRegistry, RoomSession};
pub use session::{BidOutcome, Game, IgnoreReason};
