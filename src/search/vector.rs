use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Chunk, IndexStats};

/// Bumped whenever the on-disk layout changes; older files are rebuilt.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// A stored vector entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VectorEntry {
    index: usize,
    page: usize,
    content: String,
    embedding: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexHeader {
    version: u32,
    embedding_model: String,
    dimension: usize,
    source: String,
    built_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    #[serde(flatten)]
    header: IndexHeader,
    entries: Vec<VectorEntry>,
}

/// Exhaustive cosine-similarity index over the chunks of one document.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    header: IndexHeader,
    entries: Vec<VectorEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorHit {
    pub index: usize,
    pub page: usize,
    pub content: String,
    pub score: f32,
}

impl VectorIndex {
    /// Build an index from chunks and their embeddings. `embeddings` must be parallel with `chunks`.
    pub fn build(
        embedding_model: &str,
        source: &Path,
        chunks: Vec<Chunk>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            anyhow::bail!(
                "Got {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            );
        }

        let dimension = embeddings.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = embeddings.iter().position(|e| e.len() != dimension) {
            anyhow::bail!(
                "Embedding {bad} has {} dimensions, expected {dimension}",
                embeddings[bad].len()
            );
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| VectorEntry {
                index: chunk.index,
                page: chunk.page,
                content: chunk.content,
                embedding,
            })
            .collect();

        Ok(Self {
            header: IndexHeader {
                version: INDEX_FORMAT_VERSION,
                embedding_model: embedding_model.to_string(),
                dimension,
                source: source.display().to_string(),
                built_at: Utc::now(),
            },
            entries,
        })
    }

    /// Read a persisted index. Fails on unreadable or inconsistent files and on
    /// indexes built with a different embedding model than `embedding_model`.
    pub fn load(path: &Path, embedding_model: &str) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vector index {}", path.display()))?;
        let persisted: PersistedIndex =
            serde_json::from_str(&data).context("Failed to parse vector index")?;
        let PersistedIndex { header, entries } = persisted;

        if header.version != INDEX_FORMAT_VERSION {
            anyhow::bail!(
                "Vector index format version {} is not supported (expected {INDEX_FORMAT_VERSION})",
                header.version
            );
        }
        if header.embedding_model != embedding_model {
            anyhow::bail!(
                "Vector index was built with embedding model '{}', configured model is '{embedding_model}'",
                header.embedding_model
            );
        }
        if let Some(bad) = entries
            .iter()
            .find(|e| e.embedding.len() != header.dimension)
        {
            anyhow::bail!(
                "Vector index entry {} has {} dimensions, header says {}",
                bad.index,
                bad.embedding.len(),
                header.dimension
            );
        }

        Ok(Self { header, entries })
    }

    /// Write the index to `path` (atomic write via temp file + rename).
    pub fn persist(&self, path: &Path) -> Result<()> {
        let persisted = PersistedIndex {
            header: self.header.clone(),
            entries: self.entries.clone(),
        };
        let data = serde_json::to_string(&persisted)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, data)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move vector index into {}", path.display()))?;
        Ok(())
    }

    /// Top `limit` entries by cosine similarity, best first. Ties keep chunk order.
    pub fn search(&self, query_embedding: &[f32], limit: usize) -> Vec<VectorHit> {
        let mut scored: Vec<(f32, &VectorEntry)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(query_embedding, &e.embedding), e))
            .collect();

        // Stable sort descending by score
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(score, e)| VectorHit {
                index: e.index,
                page: e.page,
                content: e.content.clone(),
                score,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            chunks: self.entries.len(),
            dimension: self.header.dimension,
            embedding_model: self.header.embedding_model.clone(),
            source: self.header.source.clone(),
            built_at: self.header.built_at,
        }
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
