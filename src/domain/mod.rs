pub mod cards;
pub mod game;
pub mod card_store;
pub mod player;

pub use cards::*;
pub use game::*;
pub use player::*;
pub use card_store::CardStore;
