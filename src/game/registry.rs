use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::{Role, Seat};
use crate::error::{GameError, Result};
use crate::game::game_manager::{GameManager, RoomHandle};
use crate::game::session::Game;
use crate::models::RoomMessage;
use crate::shared::{RoomConfig, ROOM_ID_LEN};

/// A seat obtained from the registry, already subscribed to the room's events.
#[derive(Debug)]
pub struct RoomSession {
    pub handle: RoomHandle,
    pub role: Role,
    pub events: broadcast::Receiver<RoomMessage>,
}

/// Room id -> running room. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<Mutex<HashMap<String, RoomHandle>>>,
    config: RoomConfig,
}

impl RoomRegistry {
    pub fn new(config: RoomConfig) -> Self {
        Self { rooms: Arc::default(), config }
    }

    fn rooms(&self) -> MutexGuard<'_, HashMap<String, RoomHandle>> {
        self.rooms.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens a room with `seat` as player1. Must be called inside a tokio runtime.
    pub fn create_room(&self, seat: Seat) -> RoomSession {
        let mut rooms = self.rooms();

        let room_id = loop {
            let candidate = generate_room_id();
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        let player = seat.name.clone();
        let game = Game::new(room_id.clone(), seat, StdRng::from_entropy());
        let handle = GameManager::start(game, self.config.clone());
        let events = handle.subscribe();
        rooms.insert(room_id.clone(), handle.clone());

        tracing::info!(%room_id, %player, "room created");
        RoomSession { handle, role: Role::Player1, events }
    }

    /// Seats `seat` as player2 of `room_id`, which starts the game.
    pub async fn join_room(&self, room_id: &str, seat: Seat) -> Result<RoomSession> {
        let handle = self.lookup(room_id).ok_or(GameError::RoomNotFound)?;

        // Subscribe first so the gameStarted broadcast cannot slip past.
        let events = handle.subscribe();
        let role = handle.join(seat).await?;

        Ok(RoomSession { handle, role, events })
    }

    pub fn lookup(&self, room_id: &str) -> Option<RoomHandle> {
        self.rooms().get(&normalize_room_id(room_id)).cloned()
    }

    pub fn remove_room(&self, room_id: &str) -> Option<RoomHandle> {
        let removed = self.rooms().remove(&normalize_room_id(room_id));
        if removed.is_some() {
            tracing::info!(%room_id, "room removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.rooms().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms().is_empty()
    }
}

/// Six uppercase hex characters taken from a v4 uuid.
pub fn generate_room_id() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(ROOM_ID_LEN)
        .collect::<String>()
        .to_uppercase()
}

fn normalize_room_id(room_id: &str) -> String {
    room_id.trim().to_ascii_uppercase()
}
