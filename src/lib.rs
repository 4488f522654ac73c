//! Server for a two-player sealed-bid card auction.
//!
//! Each room deals both players 13 cards, then auctions 13 cards one at a
//! time: both players secretly commit a card from their hand, the higher
//! card takes the auction card, and the final score is the sum of won cards.

pub mod app;
pub mod card_game;
pub mod domain;
pub mod error;
pub mod game;
pub mod models;
pub mod shared;
pub mod web_socket;

pub use error::{GameError, Result};
