//! Axum HTTP surface.

pub mod chat;
pub mod index;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the application router.
///
/// CORS accepts any origin, method and header with credentials; `very_permissive`
/// mirrors the request origin since a literal `*` cannot carry credentials.
/// Only suitable for local or trusted deployments.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/rebuild", post(index::rebuild))
        .route("/health", get(index::health))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::ChatModel;
    use crate::models::IndexStats;
    use crate::search::Retriever;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct OneChunkRetriever;

    #[async_trait]
    impl Retriever for OneChunkRetriever {
        async fn search(&self, _query: &str) -> anyhow::Result<String> {
            Ok("Devraj works on backend systems.".into())
        }

        async fn rebuild(&self) -> anyhow::Result<IndexStats> {
            Ok(self.stats())
        }

        fn stats(&self) -> IndexStats {
            IndexStats {
                chunks: 1,
                dimension: 2,
                embedding_model: "fixed".into(),
                source: "profile.txt".into(),
                built_at: chrono::Utc::now(),
            }
        }
    }

    struct FixedModel;

    #[async_trait]
    impl ChatModel for FixedModel {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok("He builds backend systems.".into())
        }
    }

    fn app() -> Router {
        router(AppState::with_parts(
            Config::default(),
            Arc::new(OneChunkRetriever),
            Arc::new(FixedModel),
        ))
    }

    #[tokio::test]
    async fn test_preflight_echoes_origin_with_credentials() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/chat")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://example.com"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_chat_route_accepts_json() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"question":"What does Devraj do?"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["answer"], "He builds backend systems.");
    }

    #[tokio::test]
    async fn test_health_route_is_wired() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["chunks"], 1);
    }
}
