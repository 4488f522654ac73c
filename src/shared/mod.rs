use std::time::Duration;

pub const SERVER_ADDRESS: &str = "0.0.0.0";
pub const SERVER_PORT: u16 = 5000;

pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 13;
pub const MAX_ROUNDS: usize = 13;
pub const ROOM_ID_LEN: usize = 6;

pub const ROUND_ADVANCE_DELAY: Duration = Duration::from_secs(3);

pub const ROOM_COMMAND_CAPACITY: usize = 64;
pub const ROOM_EVENT_CAPACITY: usize = 64;

/// Per-room tuning handed to the registry.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    /// Pause between a resolved round and the next auction card.
    pub round_delay: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { round_delay: ROUND_ADVANCE_DELAY }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub room: RoomConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("AUCTION_WAR_HOST").unwrap_or_else(|_| SERVER_ADDRESS.to_string());
        let port = read_env("AUCTION_WAR_PORT")
            .or_else(|| read_env("PORT"))
            .unwrap_or(SERVER_PORT);
        let round_delay = read_env::<u64>("AUCTION_WAR_ROUND_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(ROUND_ADVANCE_DELAY);

        Self { host, port, room: RoomConfig { round_delay } }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
}
