use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::{Role, Seat};
use crate::error::{GameError, Result};
use crate::game::session::{BidOutcome, Game};
use crate::models::{RoomMessage, ServerEvent};
use crate::shared::{RoomConfig, ROOM_COMMAND_CAPACITY, ROOM_EVENT_CAPACITY};

pub enum GameCommand {
    Join { seat: Seat, reply: oneshot::Sender<Result<Role>> },
    PlaceBid { role: Role, card_index: usize },
    AdvanceRound { round: usize },
    Disconnect { role: Role },
}

/// Cheap, cloneable address of a running room.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    room_id: Arc<str>,
    commands: mpsc::Sender<GameCommand>,
    events: broadcast::Sender<RoomMessage>,
}

impl RoomHandle {
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoomMessage> {
        self.events.subscribe()
    }

    /// Asks the room to seat `seat` as player2. A room whose actor has
    /// already stopped reads as not found.
    pub async fn join(&self, seat: Seat) -> Result<Role> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(GameCommand::Join { seat, reply })
            .await
            .map_err(|_| GameError::RoomNotFound)?;
        response.await.map_err(|_| GameError::RoomNotFound)?
    }

    pub async fn place_bid(&self, role: Role, card_index: usize) {
        if self.commands.send(GameCommand::PlaceBid { role, card_index }).await.is_err() {
            tracing::debug!(room_id = %self.room_id, %role, "bid for a closed room dropped");
        }
    }

    pub async fn disconnect(&self, role: Role) {
        let _ = self.commands.send(GameCommand::Disconnect { role }).await;
    }
}

/// Actor owning one room's `Game`. Commands are applied strictly one at a
/// time, so a room never sees interleaved mutations.
pub struct GameManager {
    game: Game,
    broadcaster: broadcast::Sender<RoomMessage>,
    commands: mpsc::WeakSender<GameCommand>,
    config: RoomConfig,
    pending_advance: Option<JoinHandle<()>>,
}

impl GameManager {
    pub fn start(game: Game, config: RoomConfig) -> RoomHandle {
        let (tx_cmd, rx_cmd) = mpsc::channel::<GameCommand>(ROOM_COMMAND_CAPACITY);
        let (broadcaster, _) = broadcast::channel(ROOM_EVENT_CAPACITY);

        let handle = RoomHandle {
            room_id: Arc::from(game.room_id()),
            commands: tx_cmd.clone(),
            events: broadcaster.clone(),
        };

        let manager = GameManager {
            game,
            broadcaster,
            commands: tx_cmd.downgrade(),
            config,
            pending_advance: None,
        };
        tokio::spawn(manager.run(rx_cmd));

        handle
    }

    async fn run(mut self, mut rx: mpsc::Receiver<GameCommand>) {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                GameCommand::Join { seat, reply } => {
                    let res = self.handle_join(seat);
                    let _ = reply.send(res);
                }
                GameCommand::PlaceBid { role, card_index } => {
                    self.handle_bid(role, card_index);
                }
                GameCommand::AdvanceRound { round } => {
                    self.pending_advance = None;
                    match self.game.advance_round(round) {
                        Some(message) => {
                            if let Some(card) = self.game.current_auction_card() {
                                tracing::debug!(room_id = %self.game.room_id(), round = round + 1, %card, "new round");
                            }
                            self.publish(message);
                        }
                        None => tracing::debug!(room_id = %self.game.room_id(), round, "stale round advance ignored"),
                    }
                }
                GameCommand::Disconnect { role } => {
                    tracing::info!(room_id = %self.game.room_id(), %role, "player disconnected, closing room");
                    self.publish(RoomMessage::all_except(role, ServerEvent::PlayerDisconnected { player: role }));
                    break;
                }
            }
        }

        if let Some(task) = self.pending_advance.take() {
            task.abort();
        }
        tracing::debug!(room_id = %self.game.room_id(), "room actor exiting");
    }

    fn handle_join(&mut self, seat: Seat) -> Result<Role> {
        let name = seat.name.clone();
        let messages = self.game.join(seat)?;
        tracing::info!(room_id = %self.game.room_id(), player = %name, "player2 joined, game started");
        self.publish_all(messages);
        Ok(Role::Player2)
    }

    fn handle_bid(&mut self, role: Role, card_index: usize) {
        match self.game.place_bid(role, card_index) {
            Ok(BidOutcome::Ignored(reason)) => {
                tracing::debug!(room_id = %self.game.room_id(), %role, ?reason, "bid ignored");
            }
            Ok(BidOutcome::Placed(messages)) => {
                self.publish_all(messages);
            }
            Ok(BidOutcome::Resolved { messages, next_round }) => {
                if let Some(card) = self.game.current_auction_card() {
                    tracing::debug!(room_id = %self.game.room_id(), round = self.game.round(), %card, "round resolved");
                }
                self.publish_all(messages);
                match next_round {
                    Some(round) => self.schedule_advance(round),
                    None => tracing::info!(
                        room_id = %self.game.room_id(),
                        scores = ?self.game.scores(),
                        "game over"
                    ),
                }
            }
            Err(err) => {
                tracing::warn!(room_id = %self.game.room_id(), %role, %err, "bid rejected");
                self.publish(RoomMessage::only(role, ServerEvent::Error { message: err.to_string() }));
            }
        }
    }

    fn schedule_advance(&mut self, round: usize) {
        if let Some(previous) = self.pending_advance.take() {
            previous.abort();
        }

        let commands = self.commands.clone();
        let delay = self.config.round_delay;
        self.pending_advance = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = commands.upgrade() {
                let _ = tx.send(GameCommand::AdvanceRound { round }).await;
            }
        }));
    }

    fn publish(&self, message: RoomMessage) {
        // No subscribers just means nobody is listening right now.
        let _ = self.broadcaster.send(message);
    }

    fn publish_all(&self, messages: Vec<RoomMessage>) {
        for message in messages {
            self.publish(message);
        }
    }
}
