//! Question answering: retrieve context, fill the prompt, ask the model.

pub mod prompt;

use std::sync::Arc;

use crate::llm::ChatModel;
use crate::search::Retriever;

pub use prompt::build_prompt;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("retrieval failed: {0:#}")]
    Retrieval(anyhow::Error),
    #[error("language model call failed: {0:#}")]
    Completion(anyhow::Error),
}

pub struct ChatService {
    retriever: Arc<dyn Retriever>,
    model: Arc<dyn ChatModel>,
    persona: String,
}

impl ChatService {
    pub fn new(retriever: Arc<dyn Retriever>, model: Arc<dyn ChatModel>, persona: String) -> Self {
        Self {
            retriever,
            model,
            persona,
        }
    }

    /// Answer `question` from the indexed document.
    pub async fn answer(&self, question: &str) -> Result<String, ChatError> {
        let context = self
            .retriever
            .search(question)
            .await
            .map_err(ChatError::Retrieval)?;
        tracing::debug!(
            "Context returned ({} chars): {}",
            context.len(),
            context.chars().take(500).collect::<String>()
        );

        let prompt = build_prompt(&self.persona, &context, question);

        tracing::info!("Sending prompt to language model");
        let answer = self
            .model
            .complete(&prompt)
            .await
            .map_err(ChatError::Completion)?;
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndexStats;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct FixedRetriever(Result<String, String>);

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn search(&self, _query: &str) -> anyhow::Result<String> {
            self.0.clone().map_err(|e| anyhow::anyhow!(e))
        }

        async fn rebuild(&self) -> anyhow::Result<IndexStats> {
            anyhow::bail!("not supported")
        }

        fn stats(&self) -> IndexStats {
            IndexStats {
                chunks: 0,
                dimension: 0,
                embedding_model: "none".into(),
                source: "none".into(),
                built_at: chrono::Utc::now(),
            }
        }
    }

    /// Records the prompt and replies with a fixed answer.
    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.lock().push(prompt.to_string());
            Ok("He is a software engineer.".into())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("rate limit exceeded")
        }
    }

    #[tokio::test]
    async fn test_answer_passes_context_to_model() {
        let model = Arc::new(RecordingModel::default());
        let service = ChatService::new(
            Arc::new(FixedRetriever(Ok("Devraj is a software engineer.".into()))),
            model.clone(),
            "Devraj".into(),
        );

        let answer = service.answer("What does Devraj do?").await.unwrap();
        assert_eq!(answer, "He is a software engineer.");

        let prompts = model.prompts.lock();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Devraj is a software engineer."));
        assert!(prompts[0].contains("What does Devraj do?"));
    }

    #[tokio::test]
    async fn test_model_failure_is_completion_error() {
        let service = ChatService::new(
            Arc::new(FixedRetriever(Ok(String::new()))),
            Arc::new(FailingModel),
            "X".into(),
        );
        let err = service.answer("test").await.unwrap_err();
        assert!(matches!(err, ChatError::Completion(_)));
        assert!(err.to_string().contains("rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_retrieval_failure_skips_model() {
        let model = Arc::new(RecordingModel::default());
        let service = ChatService::new(
            Arc::new(FixedRetriever(Err("embedding service down".into()))),
            model.clone(),
            "X".into(),
        );
        let err = service.answer("test").await.unwrap_err();
        assert!(matches!(err, ChatError::Retrieval(_)));
        assert!(model.prompts.lock().is_empty());
    }
}
