use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::{Role, Seat};
use crate::error::GameError;
use crate::game::{RoomHandle, RoomRegistry, RoomSession};
use crate::models::{ClientEvent, RoomMessage, RoomReply, ServerEvent};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(registry): State<RoomRegistry>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// The seat this connection holds, if any.
struct SeatBinding {
    handle: RoomHandle,
    role: Role,
    events: broadcast::Receiver<RoomMessage>,
}

impl From<RoomSession> for SeatBinding {
    fn from(session: RoomSession) -> Self {
        Self { handle: session.handle, role: session.role, events: session.events }
    }
}

async fn handle_socket(mut socket: WebSocket, registry: RoomRegistry) {
    let connection_id = Uuid::new_v4().to_string();
    let mut binding: Option<SeatBinding> = None;

    tracing::info!("[WS] connected {}", connection_id);

    loop {
        tokio::select! {
            ev = next_room_message(&mut binding) => {
                match ev {
                    Ok(message) => {
                        let Some(role) = binding.as_ref().map(|seat| seat.role) else {
                            continue;
                        };
                        if !message.delivery.includes(role) {
                            continue;
                        }
                        if send_event(&mut socket, &message.event).await.is_err() {
                            break;
                        }
                        // The room is gone once anyone leaves; free this connection.
                        if matches!(message.event, ServerEvent::PlayerDisconnected { .. }) {
                            binding = None;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("[WS] {} lagged on room events, skipped {}", connection_id, skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        binding = None;
                    }
                }
            }

            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let event = match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => event,
                            Err(err) => {
                                tracing::warn!(%err, "[WS] {} sent an invalid message", connection_id);
                                continue;
                            }
                        };

                        if handle_client_event(event, &registry, &connection_id, &mut binding, &mut socket)
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }

                    Some(Ok(Message::Close(_))) | None => break,

                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::debug!(%err, "[WS] {} socket error", connection_id);
                        break;
                    }
                }
            }
        }
    }

    if let Some(seat) = binding.take() {
        release_seat(&registry, seat).await;
    }

    tracing::info!("[WS] disconnected {}", connection_id);
}

async fn next_room_message(
    binding: &mut Option<SeatBinding>,
) -> Result<RoomMessage, broadcast::error::RecvError> {
    match binding {
        Some(seat) => seat.events.recv().await,
        None => std::future::pending().await,
    }
}

async fn handle_client_event(
    event: ClientEvent,
    registry: &RoomRegistry,
    connection_id: &str,
    binding: &mut Option<SeatBinding>,
    socket: &mut WebSocket,
) -> Result<(), axum::Error> {
    match event {
        ClientEvent::CreateRoom { player_name } => {
            if binding.is_some() {
                let reply = RoomReply::rejected(GameError::AlreadySeated.to_string());
                return send_event(socket, &ServerEvent::RoomCreated(reply)).await;
            }

            let session = registry.create_room(Seat::new(connection_id, player_name));
            let reply = RoomReply::seated(session.handle.room_id(), session.role);
            *binding = Some(session.into());
            send_event(socket, &ServerEvent::RoomCreated(reply)).await
        }

        ClientEvent::JoinRoom { room_id, player_name } => {
            if binding.is_some() {
                let reply = RoomReply::rejected(GameError::AlreadySeated.to_string());
                return send_event(socket, &ServerEvent::RoomJoined(reply)).await;
            }

            match registry.join_room(&room_id, Seat::new(connection_id, player_name.clone())).await {
                Ok(session) => {
                    tracing::info!(room_id = %session.handle.room_id(), player = %player_name, "[WS] {} joined", connection_id);
                    let reply = RoomReply::seated(session.handle.room_id(), session.role);
                    *binding = Some(session.into());
                    send_event(socket, &ServerEvent::RoomJoined(reply)).await
                }
                Err(err) => {
                    tracing::info!(%room_id, %err, "[WS] {} join rejected", connection_id);
                    send_event(socket, &ServerEvent::RoomJoined(RoomReply::rejected(err.to_string()))).await
                }
            }
        }

        ClientEvent::PlaceBid { room_id, role, card_index } => {
            match binding.as_ref() {
                Some(seat) if seat.role == role && seat.handle.room_id().eq_ignore_ascii_case(room_id.trim()) => {
                    seat.handle.place_bid(role, card_index).await;
                }
                _ => {
                    tracing::debug!(%room_id, %role, "[WS] {} bid outside its seat ignored", connection_id);
                }
            }
            Ok(())
        }
    }
}

/// Leaving tears the whole room down: unregister it first so the id can no
/// longer be joined, then let the actor notify the other seat and stop.
async fn release_seat(registry: &RoomRegistry, seat: SeatBinding) {
    registry.remove_room(seat.handle.room_id());
    seat.handle.disconnect(seat.role).await;
}

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(payload) => socket.send(Message::Text(payload)).await,
        Err(err) => {
            tracing::warn!(%err, "failed to encode server event");
            Ok(())
        }
    }
}
