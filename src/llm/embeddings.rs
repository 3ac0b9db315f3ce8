use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingConfig;

/// Maximum characters to send per text to the embedding API.
/// Chunks are far below this; it bounds arbitrarily long questions.
const MAX_EMBED_CHARS: usize = 3_000;

/// Turns text into fixed-dimension vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Identifier of the model, recorded in the persisted index.
    fn model(&self) -> &str;

    /// Embed `texts`, returning one vector per input in the same order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Generate embedding for a single text.
    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .context("No embedding returned")
    }
}

/// Embedder backed by an Ollama or OpenAI-compatible HTTP endpoint.
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: EmbeddingConfig,
}

impl HttpEmbedder {
    pub fn new(client: reqwest::Client, config: EmbeddingConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let truncated: Vec<String> = texts
            .iter()
            .map(|t| truncate_for_embedding(t).to_string())
            .collect();

        let embeddings = match self.config.provider.as_str() {
            "ollama" => embed_ollama(&self.client, &self.config, &truncated).await?,
            "openai" => embed_openai(&self.client, &self.config, &truncated).await?,
            other => anyhow::bail!("Unknown embedding provider: {other}"),
        };

        if embeddings.len() != texts.len() {
            anyhow::bail!(
                "Embedding API returned {} vectors for {} inputs",
                embeddings.len(),
                texts.len()
            );
        }
        Ok(embeddings)
    }
}

/// Truncate `text` to at most `MAX_EMBED_CHARS`, splitting on a UTF-8 char boundary.
fn truncate_for_embedding(text: &str) -> &str {
    if text.len() <= MAX_EMBED_CHARS {
        return text;
    }
    let mut end = MAX_EMBED_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaEmbedRequest {
    model: String,
    input: Vec<String>,
    truncate: bool,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

async fn embed_ollama(
    client: &reqwest::Client,
    config: &EmbeddingConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    let url = format!("{}/api/embed", config.base_url.trim_end_matches('/'));

    let batch_size = 32;
    let mut all_embeddings = Vec::with_capacity(texts.len());

    for chunk in texts.chunks(batch_size) {
        let req = OllamaEmbedRequest {
            model: config.model.clone(),
            input: chunk.to_vec(),
            truncate: true,
        };

        let resp = client
            .post(&url)
            .json(&req)
            .send()
            .await
            .context("Failed to call Ollama embed API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Ollama embed API returned {status}: {body}");
        }

        let body: OllamaEmbedResponse = resp
            .json()
            .await
            .context("Failed to parse Ollama embed response")?;

        all_embeddings.extend(body.embeddings);
    }

    Ok(all_embeddings)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiEmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct OpenAiEmbedResponse {
    data: Vec<OpenAiEmbedData>,
}

#[derive(Deserialize)]
struct OpenAiEmbedData {
    index: usize,
    embedding: Vec<f32>,
}

async fn embed_openai(
    client: &reqwest::Client,
    config: &EmbeddingConfig,
    texts: &[String],
) -> Result<Vec<Vec<f32>>> {
    let url = format!("{}/v1/embeddings", config.base_url.trim_end_matches('/'));
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let batch_size = 64;
    let mut all_embeddings = Vec::with_capacity(texts.len());

    for chunk in texts.chunks(batch_size) {
        let req = OpenAiEmbedRequest {
            model: config.model.clone(),
            input: chunk.to_vec(),
        };

        let resp = client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&req)
            .send()
            .await
            .context("Failed to call OpenAI embed API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI embed API returned {status}: {body}");
        }

        let body: OpenAiEmbedResponse = resp
            .json()
            .await
            .context("Failed to parse OpenAI embed response")?;

        all_embeddings.extend(in_input_order(body.data));
    }

    Ok(all_embeddings)
}

/// OpenAI tags each vector with its input position; don't rely on response order.
fn in_input_order(mut data: Vec<OpenAiEmbedData>) -> Vec<Vec<f32>> {
    data.sort_by_key(|d| d.index);
    data.into_iter().map(|d| d.embedding).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_for_embedding("hello"), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "a".repeat(MAX_EMBED_CHARS + 50);
        assert_eq!(truncate_for_embedding(&long).len(), MAX_EMBED_CHARS);
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let s = format!("{}🌍🌍", "a".repeat(MAX_EMBED_CHARS - 2));
        let t = truncate_for_embedding(&s);
        assert!(t.len() <= MAX_EMBED_CHARS);
        assert!(s.is_char_boundary(t.len()));
    }

    #[test]
    fn test_openai_vectors_reordered_by_index() {
        let body = r#"{"data":[{"index":1,"embedding":[2.0]},{"index":0,"embedding":[1.0]}]}"#;
        let parsed: OpenAiEmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(in_input_order(parsed.data), vec![vec![1.0], vec![2.0]]);
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_request() {
        let embedder = HttpEmbedder::new(
            reqwest::Client::new(),
            EmbeddingConfig {
                base_url: "http://127.0.0.1:1".into(),
                ..EmbeddingConfig::default()
            },
        );
        assert!(embedder.embed_batch(&[]).await.unwrap().is_empty());
    }
}
