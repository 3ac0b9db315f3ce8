use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A span of document text, the unit that gets embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Position of the chunk across the whole document.
    pub index: usize,
    /// 1-based page the chunk was cut from.
    pub page: usize,
    pub content: String,
}

/// Chat request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Chat response. Failures are reported in the body, not the status code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatReply {
    Answer { answer: String },
    Error { error: String },
}

/// Response to an explicit index rebuild.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RebuildReply {
    Rebuilt {
        chunks: usize,
        built_at: DateTime<Utc>,
    },
    Error {
        error: String,
    },
}

/// Summary of the index currently being served.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub chunks: usize,
    pub dimension: usize,
    pub embedding_model: String,
    pub source: String,
    pub built_at: DateTime<Utc>,
}

/// Health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthReply {
    pub status: &'static str,
    #[serde(flatten)]
    pub index: IndexStats,
}
