use crate::relay::{ChatReply, Relay};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /chat`. The body is taken as raw bytes so that every decode failure
/// produces the relay's own 400 payload.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<ChatReply>) {
    let request_id = Uuid::new_v4();

    async move {
        info!("Received chat request ({} bytes)", body.len());

        let (status, reply) = state.relay.handle(&body).await;
        if status.is_success() {
            info!("Chat request completed");
        } else {
            warn!("Chat request failed with status {}", status.as_u16());
        }

        (status, Json(reply))
    }
    .instrument(info_span!("chat", %request_id))
    .await
}
