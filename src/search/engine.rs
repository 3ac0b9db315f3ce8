use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::chunking::chunk_pages;
use crate::config::RetrievalConfig;
use crate::document::load_document;
use crate::llm::Embedder;
use crate::models::IndexStats;
use crate::search::vector::{VectorHit, VectorIndex};

/// What the chat layer needs from retrieval. Implemented by [`RetrievalEngine`];
/// tests substitute their own.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Context for `query`: the top-k chunk texts joined by newlines, best first.
    async fn search(&self, query: &str) -> Result<String>;

    /// Rebuild the index from the source document and start serving it.
    async fn rebuild(&self) -> Result<IndexStats>;

    fn stats(&self) -> IndexStats;
}

/// Owns the vector index of one document.
///
/// The index is read by every request and replaced only by [`RetrievalEngine::rebuild`],
/// which finishes building and persisting before it swaps the new index in.
pub struct RetrievalEngine {
    config: RetrievalConfig,
    embedder: Arc<dyn Embedder>,
    index: RwLock<Arc<VectorIndex>>,
    rebuild_lock: tokio::sync::Mutex<()>,
}

impl RetrievalEngine {
    /// Load the persisted index, or build one from the document when it is
    /// missing or unreadable.
    pub async fn open(config: RetrievalConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        std::fs::create_dir_all(&config.index_dir).with_context(|| {
            format!(
                "Failed to create index directory {}",
                config.index_dir.display()
            )
        })?;

        let index_file = config.index_file();
        let index = if index_file.exists() {
            tracing::info!("Loading vector index from {}", index_file.display());
            match VectorIndex::load(&index_file, embedder.model()) {
                Ok(index) => index,
                Err(e) => {
                    tracing::warn!("Vector index unusable, rebuilding: {e:#}");
                    build_index(&config, embedder.as_ref()).await?
                }
            }
        } else {
            tracing::info!(
                "No vector index at {}, building a new one",
                index_file.display()
            );
            build_index(&config, embedder.as_ref()).await?
        };

        tracing::info!(
            "Vector index ready: {} chunks, {} dimensions",
            index.len(),
            index.stats().dimension
        );

        Ok(Self {
            config,
            embedder,
            index: RwLock::new(Arc::new(index)),
            rebuild_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Scored top-`k` hits for `query`.
    pub async fn search_hits(&self, query: &str, k: usize) -> Result<Vec<VectorHit>> {
        let index = self.index.read().clone();
        if index.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed_single(query)
            .await
            .context("Failed to embed query")?;
        Ok(index.search(&query_embedding, k))
    }
}

#[async_trait]
impl Retriever for RetrievalEngine {
    async fn search(&self, query: &str) -> Result<String> {
        tracing::debug!("Searching for: {query}");
        let hits = self.search_hits(query, self.config.top_k).await?;
        Ok(hits
            .iter()
            .map(|h| h.content.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn rebuild(&self) -> Result<IndexStats> {
        let _guard = self.rebuild_lock.lock().await;
        let index = build_index(&self.config, self.embedder.as_ref()).await?;
        let stats = index.stats();
        *self.index.write() = Arc::new(index);
        tracing::info!("Vector index rebuilt: {} chunks", stats.chunks);
        Ok(stats)
    }

    fn stats(&self) -> IndexStats {
        self.index.read().stats()
    }
}

/// Load, chunk and embed the document, then persist the fresh index.
async fn build_index(config: &RetrievalConfig, embedder: &dyn Embedder) -> Result<VectorIndex> {
    tracing::info!("Loading document: {}", config.document_path.display());
    let path = config.document_path.clone();
    let pages = tokio::task::spawn_blocking(move || load_document(&path))
        .await
        .context("Document loader task failed")??;

    let chunks = chunk_pages(&pages, config.chunk_size, config.chunk_overlap);
    tracing::info!(
        "Split {} pages into {} chunks (size {}, overlap {})",
        pages.len(),
        chunks.len(),
        config.chunk_size,
        config.chunk_overlap
    );

    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = embedder
        .embed_batch(&texts)
        .await
        .context("Failed to embed document chunks")?;

    let index = VectorIndex::build(embedder.model(), &config.document_path, chunks, embeddings)?;

    let index_file = config.index_file();
    index.persist(&index_file)?;
    tracing::info!("Saved vector index to {}", index_file.display());

    Ok(index)
}
