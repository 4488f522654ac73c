use std::fmt;

use serde::{Serialize, Deserialize};

/// The two fixed seats of a room.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Player1,
    Player2,
}

impl Role {
    pub const BOTH: [Role; 2] = [Role::Player1, Role::Player2];

    pub fn opponent(self) -> Role {
        match self {
            Role::Player1 => Role::Player2,
            Role::Player2 => Role::Player1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Player1 => "player1",
            Role::Player2 => "player2",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who sits in a seat: the connection that claimed it and the display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub connection_id: String,
    pub name: String,
}

impl Seat {
    pub fn new(connection_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { connection_id: connection_id.into(), name: name.into() }
    }
}
