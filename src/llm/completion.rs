use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// A language model that turns a prompt into generated text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Single-turn, non-streaming completion over Ollama or an OpenAI-compatible
/// API (Groq by default).
pub struct HttpChatModel {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpChatModel {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ChatModel for HttpChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self.config.provider.as_str() {
            "ollama" => call_ollama(&self.client, &self.config, prompt).await,
            "openai" => call_openai(&self.client, &self.config, prompt).await,
            other => anyhow::bail!("Unknown LLM provider: {other}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

fn user_message(prompt: &str) -> Vec<Message> {
    vec![Message {
        role: "user".to_string(),
        content: prompt.to_string(),
    }]
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Message,
}

async fn call_ollama(client: &reqwest::Client, config: &LlmConfig, prompt: &str) -> Result<String> {
    let url = format!("{}/api/chat", config.base_url.trim_end_matches('/'));

    let req = OllamaChatRequest {
        model: config.chat_model.clone(),
        messages: user_message(prompt),
        stream: false,
    };

    let resp = client
        .post(&url)
        .json(&req)
        .send()
        .await
        .context("Failed to call Ollama chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Ollama chat API returned {status}: {body}");
    }

    let body = resp
        .text()
        .await
        .context("Failed to read Ollama chat response")?;
    parse_ollama_response(&body)
}

fn parse_ollama_response(body: &str) -> Result<String> {
    let parsed: OllamaChatResponse =
        serde_json::from_str(body).context("Failed to parse Ollama chat response")?;
    Ok(parsed.message.content)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

async fn call_openai(client: &reqwest::Client, config: &LlmConfig, prompt: &str) -> Result<String> {
    let url = format!(
        "{}/v1/chat/completions",
        config.base_url.trim_end_matches('/')
    );
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = OpenAiChatRequest {
        model: config.chat_model.clone(),
        messages: user_message(prompt),
    };

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call OpenAI chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("OpenAI chat API returned {status}: {body}");
    }

    let body = resp
        .text()
        .await
        .context("Failed to read OpenAI chat response")?;
    parse_openai_response(&body)
}

fn parse_openai_response(body: &str) -> Result<String> {
    let parsed: OpenAiChatResponse =
        serde_json::from_str(body).context("Failed to parse OpenAI chat response")?;
    parsed
        .choices
        .into_iter()
        .next()
        .context("OpenAI chat response contained no choices")
        .map(|c| c.message.content.unwrap_or_default())
}
