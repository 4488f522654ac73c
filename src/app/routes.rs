use axum::{Router, routing::get};

use crate::game::RoomRegistry;

pub fn create_routes(registry: RoomRegistry) -> Router {
    Router::new()
        .route("/ws", get(crate::web_socket::ws_handler))
        .route("/healthz", get(healthz))
        .with_state(registry)
}

async fn healthz() -> &'static str {
    "ok"
}
