//! Clients for the hosted models: embeddings for retrieval, completions for answers.

pub mod completion;
pub mod embeddings;

pub use completion::{ChatModel, HttpChatModel};
pub use embeddings::{Embedder, HttpEmbedder};
