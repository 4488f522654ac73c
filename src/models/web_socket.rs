use serde::{Serialize, Deserialize};

use crate::domain::{Bid, Card, GameWinner, PerRole, Role};

/// Inbound frames, `{"type": "...", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    CreateRoom { player_name: String },
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, player_name: String },
    #[serde(rename_all = "camelCase")]
    PlaceBid { room_id: String, role: Role, card_index: usize },
}

/// Answer to `createRoom` / `joinRoom`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomReply {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RoomReply {
    pub fn seated(room_id: impl Into<String>, role: Role) -> Self {
        Self { success: true, room_id: Some(room_id.into()), role: Some(role), message: None }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self { success: false, room_id: None, role: None, message: Some(message.into()) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    RoomCreated(RoomReply),
    RoomJoined(RoomReply),
    #[serde(rename_all = "camelCase")]
    GameStarted {
        players: PerRole<String>,
        hands: PerRole<Vec<Card>>,
        current_auction_card: Card,
        turn_order: [Role; 2],
    },
    OpponentBid,
    #[serde(rename_all = "camelCase")]
    BidResults {
        bids: PerRole<Bid>,
        winner: Role,
        card: Card,
        cards_history: PerRole<Vec<Card>>,
        used_cards: PerRole<Vec<Card>>,
    },
    #[serde(rename_all = "camelCase")]
    NewRound {
        /// 1-indexed.
        round: usize,
        current_auction_card: Card,
    },
    GameOver {
        collections: PerRole<Vec<Card>>,
        scores: PerRole<u32>,
        winner: GameWinner,
    },
    PlayerDisconnected { player: Role },
    Error { message: String },
}

/// Which members of a room receive an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Room,
    Only(Role),
    AllExcept(Role),
}

impl Delivery {
    pub fn includes(self, role: Role) -> bool {
        match self {
            Delivery::Room => true,
            Delivery::Only(target) => target == role,
            Delivery::AllExcept(excluded) => excluded != role,
        }
    }
}

/// An event on a room's broadcast channel, addressed by seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMessage {
    pub delivery: Delivery,
    pub event: ServerEvent,
}

impl RoomMessage {
    pub fn room(event: ServerEvent) -> Self {
        Self { delivery: Delivery::Room, event }
    }

    pub fn only(role: Role, event: ServerEvent) -> Self {
        Self { delivery: Delivery::Only(role), event }
    }

    pub fn all_except(role: Role, event: ServerEvent) -> Self {
        Self { delivery: Delivery::AllExcept(role), event }
    }
}
