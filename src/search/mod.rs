//! Retrieval: the persisted vector index and the engine that loads, rebuilds and queries it.

pub mod engine;
pub mod vector;

pub use engine::{RetrievalEngine, Retriever};
pub use vector::{VectorHit, VectorIndex};
