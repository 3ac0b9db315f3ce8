use std::sync::Arc;

use crate::assistant::ChatService;
use crate::config::Config;
use crate::llm::{ChatModel, HttpChatModel, HttpEmbedder};
use crate::search::{RetrievalEngine, Retriever};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub retriever: Arc<dyn Retriever>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Build the HTTP clients and open (or build) the vector index.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        let embedder = Arc::new(HttpEmbedder::new(
            http_client.clone(),
            config.embedding.clone(),
        ));
        let engine = RetrievalEngine::open(config.retrieval.clone(), embedder).await?;
        let model = Arc::new(HttpChatModel::new(http_client, config.llm.clone()));

        Ok(Self::with_parts(config, Arc::new(engine), model))
    }

    /// Assemble state from already-built collaborators.
    pub fn with_parts(
        config: Config,
        retriever: Arc<dyn Retriever>,
        model: Arc<dyn ChatModel>,
    ) -> Self {
        let chat = ChatService::new(retriever.clone(), model, config.persona.clone());
        Self {
            config: Arc::new(config),
            retriever,
            chat: Arc::new(chat),
        }
    }
}
