//! # rag-chat
//!
//! Answers questions about a single document. The document is chunked,
//! embedded and stored in a vector index on disk; each question pulls the
//! closest chunks from that index and hands them to a hosted language model
//! together with the question.
//!
//! ## Architecture
//!
//! ```text
//!   startup                                  per request
//!   ───────                                  ───────────
//!   ┌──────────────┐                         POST /chat {"question"}
//!   │ index.json?  │                                  │
//!   └──┬────────┬──┘                                  ▼
//!  loads│        │missing / unreadable        ┌───────────────┐
//!      │        ▼                            │ embed question │
//!      │  ┌───────────────────────┐          └───────┬───────┘
//!      │  │ load document (PDF)   │                  ▼
//!      │  │ split 800 / 200       │          ┌───────────────┐
//!      │  │ embed chunks          │          │ top-4 cosine  │──▶ context
//!      │  │ persist index.json    │          └───────────────┘       │
//!      │  └──────────┬────────────┘                                  ▼
//!      ▼             ▼                                      ┌────────────────┐
//!   ┌─────────────────────┐                                 │ prompt + LLM   │
//!   │  VectorIndex (RAM)  │◀── read by every request        └───────┬────────┘
//!   └─────────────────────┘                                         ▼
//!                                                 {"answer"} or {"error"}
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration with defaults and validation
//! - [`models`] - Wire types and the `Chunk` unit
//! - [`document`] - PDF / text loading into pages
//! - [`chunking`] - Recursive character splitter with overlap
//! - [`llm::embeddings`] - `Embedder` trait and the Ollama / OpenAI-compatible client
//! - [`llm::completion`] - `ChatModel` trait and the Ollama / OpenAI-compatible client
//! - [`search::vector`] - Cosine-similarity index with JSON persistence
//! - [`search::engine`] - Load-or-rebuild retrieval engine behind the `Retriever` trait
//! - [`assistant`] - Prompt template and the answer operation
//! - [`api`] - Axum handlers and router
//! - [`state`] - Shared application state built once at startup

pub mod api;
pub mod assistant;
pub mod chunking;
pub mod config;
pub mod document;
pub mod llm;
pub mod models;
pub mod search;
pub mod state;
