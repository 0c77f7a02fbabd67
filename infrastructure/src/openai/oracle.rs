//! OpenAI-backed oracle adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use twentyq_application::ports::oracle_gateway::{OracleError, OracleGateway};
use twentyq_domain::{parse_oracle_reply, Candidate, Model, OracleReply, PromptTemplate, Question};

use super::client::{ChatMessage, OpenAiClient};

/// Token budget for oracle replies (the model may reason before answering)
const MAX_COMPLETION_TOKENS: u32 = 20_000;

/// Oracle served by an OpenAI chat model.
///
/// Stateless: each query is a fresh two-message conversation evaluating
/// one question against one candidate, independent of all other
/// candidates and rounds.
pub struct OpenAiOracle {
    client: Arc<OpenAiClient>,
    model: Model,
}

impl OpenAiOracle {
    pub fn new(client: Arc<OpenAiClient>, model: Model) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl OracleGateway for OpenAiOracle {
    async fn answer_for(
        &self,
        question: &Question,
        candidate: &Candidate,
    ) -> Result<OracleReply, OracleError> {
        let messages = [
            ChatMessage::system(PromptTemplate::oracle_system()),
            ChatMessage::user(PromptTemplate::oracle_query(question.content(), candidate)),
        ];

        let response = self
            .client
            .chat(&self.model, &messages, MAX_COMPLETION_TOKENS, None)
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout
                } else {
                    OracleError::RequestFailed(e.to_string())
                }
            })?;

        let reply = parse_oracle_reply(&response);
        debug!(model = %self.model, candidate = %candidate, "oracle: {}", reply);
        Ok(reply)
    }
}
