use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Providers understood by both the embedding and completion clients.
pub const KNOWN_PROVIDERS: &[&str] = &["ollama", "openai"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Whose assistant the prompt speaks for
    pub persona: String,
    /// Document, index location and splitter settings
    pub retrieval: RetrievalConfig,
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Completion provider configuration
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// The single document the index is built from
    pub document_path: PathBuf,
    /// Directory holding the persisted index
    pub index_dir: PathBuf,
    /// Maximum characters per chunk
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,
    /// Number of chunks joined into the context
    pub top_k: usize,
}

/// Configuration for the embedding endpoint (Ollama or OpenAI-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "ollama" or "openai"
    pub provider: String,
    pub base_url: String,
    /// Model name for embeddings. Stored in the index so a model change forces a rebuild.
    pub model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the LLM API. `/v1/chat/completions` is appended for openai.
    pub base_url: String,
    /// Model name for answers
    pub chat_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            persona: "Devraj Singh Chouhan".to_string(),
            retrieval: RetrievalConfig::default(),
            embedding: EmbeddingConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("data/Devraj_Structured_Profile.pdf"),
            index_dir: PathBuf::from("vectorstore/index"),
            chunk_size: 800,
            chunk_overlap: 200,
            top_k: 4,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
            api_key: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.groq.com/openai".to_string(),
            chat_model: "llama-3.1-8b-instant".to_string(),
            api_key: None,
        }
    }
}

/// Load `.env` from the working directory if present. Missing files are fine.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("RAG_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(persona) = std::env::var("RAG_PERSONA") {
            config.persona = persona;
        }

        // Retrieval
        if let Ok(path) = std::env::var("RAG_DOCUMENT_PATH") {
            config.retrieval.document_path = PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var("RAG_INDEX_DIR") {
            config.retrieval.index_dir = PathBuf::from(dir);
        }
        if let Ok(val) = std::env::var("RAG_CHUNK_SIZE") {
            if let Ok(v) = val.parse() {
                config.retrieval.chunk_size = v;
            }
        }
        if let Ok(val) = std::env::var("RAG_CHUNK_OVERLAP") {
            if let Ok(v) = val.parse() {
                config.retrieval.chunk_overlap = v;
            }
        }
        if let Ok(val) = std::env::var("RAG_TOP_K") {
            if let Ok(v) = val.parse() {
                config.retrieval.top_k = v;
            }
        }

        // Embeddings
        if let Ok(provider) = std::env::var("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }
        if let Ok(url) = std::env::var("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Some(key) = non_empty_var("EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(key);
        }

        // Completion
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        config.llm.api_key =
            non_empty_var("LLM_API_KEY").or_else(|| non_empty_var("GROQ_API_KEY"));

        config
    }

    /// Reject settings the service cannot run with. Called once at startup.
    pub fn validate(&self) -> anyhow::Result<()> {
        let r = &self.retrieval;
        if r.chunk_size == 0 {
            anyhow::bail!("RAG_CHUNK_SIZE must be greater than zero");
        }
        if r.chunk_overlap >= r.chunk_size {
            anyhow::bail!(
                "RAG_CHUNK_OVERLAP ({}) must be smaller than RAG_CHUNK_SIZE ({})",
                r.chunk_overlap,
                r.chunk_size
            );
        }
        if r.top_k == 0 {
            anyhow::bail!("RAG_TOP_K must be greater than zero");
        }

        for (name, provider) in [
            ("EMBEDDING_PROVIDER", &self.embedding.provider),
            ("LLM_PROVIDER", &self.llm.provider),
        ] {
            if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
                anyhow::bail!("Unknown {name}: {provider} (expected one of {KNOWN_PROVIDERS:?})");
            }
        }
        if self.embedding.model.trim().is_empty() {
            anyhow::bail!("EMBEDDING_MODEL must not be empty");
        }
        if self.llm.chat_model.trim().is_empty() {
            anyhow::bail!("LLM_CHAT_MODEL must not be empty");
        }

        if self.llm.provider == "openai" && self.llm.api_key.is_none() {
            tracing::warn!("No LLM_API_KEY / GROQ_API_KEY set; completion calls will likely be rejected");
        }
        if self.embedding.provider == "openai" && self.embedding.api_key.is_none() {
            tracing::warn!("No EMBEDDING_API_KEY set for the openai embedding provider");
        }

        Ok(())
    }
}

impl RetrievalConfig {
    pub fn index_file(&self) -> PathBuf {
        self.index_dir.join("index.json")
    }
}

/// An unset variable and one set to blank are treated alike.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
