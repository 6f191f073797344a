//! Match analyst agent.
//!
//! Embeds a player's aggregate CSV verbatim in a fixed prompt template and
//! asks the backend one question about it. The table is never truncated or
//! summarized before embedding, so very long histories are bounded by the
//! model's input budget, not by this agent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::backend::{AiBackend, ChatMessage, ChatRequest};
use super::{Agent, AgentError};

/// Input to the analyst: the aggregate table plus the player's question.
#[derive(Debug, Clone)]
pub struct AnalystInput {
    pub csv: String,
    pub question: String,
}

/// The model's answer, unmodified.
#[derive(Debug, Clone)]
pub struct AnalystOutput {
    pub answer: String,
    pub model: String,
}

/// Agent that answers free-text questions about a player's match history.
pub struct MatchAnalystAgent {
    backend: Arc<dyn AiBackend>,
    max_tokens: u32,
}

impl MatchAnalystAgent {
    pub fn new(backend: Arc<dyn AiBackend>, max_tokens: u32) -> Self {
        Self {
            backend,
            max_tokens,
        }
    }
}

/// Deterministic prompt embedding the whole table and the question.
pub fn build_prompt(csv: &str, question: &str) -> String {
    format!(
        "You are a League of Legends gameplay analyst. You have access to a player's match history data in CSV format.\n\
         \n\
         Here is the player's match data:\n\
         \n\
         {csv}\n\
         \n\
         The player is asking: {question}\n\
         \n\
         Please analyze the data and provide a helpful, insightful answer. Be specific and reference actual statistics from the data. Keep your response concise but informative (2-3 paragraphs max).\n\
         \n\
         If the question cannot be answered with the available data, explain what additional information would be needed."
    )
}

#[async_trait]
impl Agent for MatchAnalystAgent {
    type Input = AnalystInput;
    type Output = AnalystOutput;

    fn name(&self) -> &'static str {
        "match_analyst"
    }

    async fn execute(&self, input: AnalystInput) -> Result<AnalystOutput, AgentError> {
        let prompt = build_prompt(&input.csv, &input.question);
        let request =
            ChatRequest::new(vec![ChatMessage::user(prompt)]).with_max_tokens(self.max_tokens);

        let response = self.backend.chat(request).await?;
        info!(
            "Analyst answered via {} ({} chars)",
            self.backend.name(),
            response.content.len()
        );

        Ok(AnalystOutput {
            answer: response.content,
            model: response.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::backend::MockBackend;

    #[test]
    fn test_prompt_embeds_table_and_question() {
        let prompt = build_prompt("matchId,kills\nOC1_1,7\n", "What's my best champion?");

        assert!(prompt.contains("matchId,kills\nOC1_1,7\n"));
        assert!(prompt.contains("The player is asking: What's my best champion?"));
        assert!(prompt.starts_with("You are a League of Legends gameplay analyst."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prompt("csv", "q");
        let b = build_prompt("csv", "q");
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_execute_returns_backend_answer() {
        let agent = MatchAnalystAgent::new(Arc::new(MockBackend::new("Play more Ahri.")), 1000);

        let output = agent
            .execute(AnalystInput {
                csv: "matchId\nOC1_1\n".to_string(),
                question: "What should I do?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.answer, "Play more Ahri.");
        assert_eq!(output.model, "mock");
        assert_eq!(agent.name(), "match_analyst");
    }
}
