use tracing_subscriber::EnvFilter;

use rag_chat::api;
use rag_chat::config::{self, Config};
use rag_chat::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    config.validate()?;
    tracing::info!("Document: {}", config.retrieval.document_path.display());
    tracing::info!("Index directory: {}", config.retrieval.index_dir.display());
    tracing::info!(
        "Embeddings: {} ({}, {})",
        config.embedding.model,
        config.embedding.provider,
        config.embedding.base_url
    );
    tracing::info!(
        "LLM: {} ({}, {})",
        config.llm.chat_model,
        config.llm.provider,
        config.llm.base_url
    );

    // Index load/build happens here; failures are fatal before we start listening.
    let state = AppState::new(config.clone()).await?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
