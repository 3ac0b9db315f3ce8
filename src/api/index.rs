use axum::extract::State;
use axum::Json;

use crate::models::{HealthReply, RebuildReply};
use crate::state::AppState;

/// POST /rebuild - re-read the document and replace the served index.
pub async fn rebuild(State(state): State<AppState>) -> Json<RebuildReply> {
    tracing::info!("Index rebuild requested");

    match state.retriever.rebuild().await {
        Ok(stats) => Json(RebuildReply::Rebuilt {
            chunks: stats.chunks,
            built_at: stats.built_at,
        }),
        Err(e) => {
            tracing::error!("Index rebuild failed: {e:#}");
            Json(RebuildReply::Error {
                error: format!("{e:#}"),
            })
        }
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthReply> {
    Json(HealthReply {
        status: "ok",
        index: state.retriever.stats(),
    })
}
