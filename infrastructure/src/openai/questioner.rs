//! OpenAI-backed questioner adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use twentyq_application::ports::questioner::{Questioner, QuestionerError};
use twentyq_domain::{
    parse_questioner_reply, Candidate, CandidatePool, Exchange, Model, PromptTemplate,
    QuestionerReply, ReasoningEffort,
};

use super::client::{ChatMessage, OpenAiClient};

/// Token budget for question generation
const MAX_COMPLETION_TOKENS: u32 = 30_000;

/// Questioner served by an OpenAI chat model.
///
/// The system prompt enumerates the full starting roster; per call, the
/// history is replayed as alternating assistant/user turns so the model
/// keeps its own questions and the oracle's answers in context.
pub struct OpenAiQuestioner {
    client: Arc<OpenAiClient>,
    model: Model,
    reasoning_effort: ReasoningEffort,
    system_prompt: String,
}

impl OpenAiQuestioner {
    pub fn new(
        client: Arc<OpenAiClient>,
        model: Model,
        reasoning_effort: ReasoningEffort,
        roster: &[Candidate],
    ) -> Self {
        Self {
            client,
            model,
            reasoning_effort,
            system_prompt: PromptTemplate::questioner_system(roster),
        }
    }

    fn build_messages(&self, history: &[Exchange]) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(self.system_prompt.clone())];
        for (role, content) in PromptTemplate::history_messages(history) {
            messages.push(match role {
                "assistant" => ChatMessage::assistant(content),
                _ => ChatMessage::user(content),
            });
        }
        messages.push(ChatMessage::user(PromptTemplate::questioner_turn()));
        messages
    }
}

#[async_trait]
impl Questioner for OpenAiQuestioner {
    async fn next_question(
        &self,
        history: &[Exchange],
        pool: &CandidatePool,
    ) -> Result<QuestionerReply, QuestionerError> {
        let messages = self.build_messages(history);

        // Reasoning effort is only meaningful for reasoning models
        let effort = self
            .model
            .is_reasoning()
            .then(|| self.reasoning_effort.as_str());

        let response = self
            .client
            .chat(&self.model, &messages, MAX_COMPLETION_TOKENS, effort)
            .await
            .map_err(|e| QuestionerError::Unreachable(e.to_string()))?;

        debug!(model = %self.model, "questioner replied: {}", response.trim());

        parse_questioner_reply(&response, pool)
            .ok_or_else(|| QuestionerError::Unparseable(response))
    }
}
