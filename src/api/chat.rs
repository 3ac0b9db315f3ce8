use axum::extract::State;
use axum::Json;

use crate::models::{ChatReply, ChatRequest};
use crate::state::AppState;

/// POST /chat - answer a question from the indexed document.
///
/// Failures come back as `{"error": ...}` with a 200 status; callers tell the
/// two apart by the body shape.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatReply> {
    tracing::info!("User question: {}", req.question);

    match state.chat.answer(&req.question).await {
        Ok(answer) => Json(ChatReply::Answer { answer }),
        Err(e) => {
            tracing::error!("Chat request failed: {e}");
            Json(ChatReply::Error {
                error: e.to_string(),
            })
        }
    }
}
