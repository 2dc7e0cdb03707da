//! Chat-completions client and the [`DialogueModel`] trait.

use async_trait::async_trait;
use carefully_core::conversation::ConversationTurn;
use carefully_core::scoring::{clamp_score, FeedbackRubric};
use carefully_core::sentiment::validate_sentiment;
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::prompts::{feedback_system_prompt, history_messages, reply_system_prompt, ChatMessage};
use crate::types::CharacterReply;

/// Errors from the generation service layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Generation request failed: {0}")]
    Request(reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Generation request timed out")]
    Timeout,

    /// The API returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The model's output could not be parsed into the expected shape.
    #[error("Malformed model output: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Classify a transport error, separating timeouts so callers can map
    /// them to a distinct (retryable) status.
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(err)
        }
    }
}

/// The generation capability the session lifecycle depends on.
///
/// Both methods take the scenario's prose `context`, the ordered prior
/// history, and the trainee's new (already-trimmed) message.
#[async_trait]
pub trait DialogueModel: Send + Sync {
    /// Produce the character's next in-character reply.
    async fn generate_reply(
        &self,
        context: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<CharacterReply, LlmError>;

    /// Score the trainee's message along the feedback axes.
    async fn generate_feedback(
        &self,
        context: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<FeedbackRubric, LlmError>;
}

// ---------------------------------------------------------------------------
// OpenAI implementation
// ---------------------------------------------------------------------------

/// Production [`DialogueModel`] backed by an OpenAI-style chat completions
/// API.
pub struct OpenAiModel {
    client: reqwest::Client,
    config: LlmConfig,
}

/// Chat completions response envelope (the subset we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Wire shape of the model's reply JSON.
#[derive(Debug, Deserialize)]
struct ReplyPayload {
    message: String,
    sentiment: String,
    should_continue: bool,
}

/// Wire shape of the model's feedback JSON. Scores arrive as i64 and are
/// clamped; a model reporting 120 empathy is stored as 100.
#[derive(Debug, Deserialize)]
struct FeedbackPayload {
    empathy: i64,
    tone: i64,
    clarity: i64,
    decision_making: i64,
    overall_score: i64,
    summary: String,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl OpenAiModel {
    /// Create a client from configuration. The per-request timeout is
    /// baked into the underlying `reqwest::Client`.
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");
        Self { client, config }
    }

    /// Run one chat completion in JSON mode and return the raw content
    /// string of the first choice.
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "response_format": { "type": "json_object" },
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(LlmError::from_reqwest)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::MalformedResponse("Response contained no choices".into()))?;
        Ok(choice.message.content)
    }

    /// Assemble the message list: system prompt, prior history, new
    /// trainee message.
    fn build_messages(
        system_prompt: String,
        history: &[ConversationTurn],
        message: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: system_prompt,
        }];
        messages.extend(history_messages(history));
        messages.push(ChatMessage {
            role: "user",
            content: message.to_string(),
        });
        messages
    }
}

#[async_trait]
impl DialogueModel for OpenAiModel {
    async fn generate_reply(
        &self,
        context: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<CharacterReply, LlmError> {
        let messages = Self::build_messages(reply_system_prompt(context), history, message);
        let content = self.chat(messages).await?;

        let payload: ReplyPayload = serde_json::from_str(&content)
            .map_err(|e| LlmError::MalformedResponse(format!("Reply was not valid JSON: {e}")))?;

        validate_sentiment(&payload.sentiment)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        tracing::debug!(
            sentiment = %payload.sentiment,
            should_continue = payload.should_continue,
            "Generated character reply",
        );

        Ok(CharacterReply {
            message: payload.message,
            sentiment: payload.sentiment,
            should_continue: payload.should_continue,
        })
    }

    async fn generate_feedback(
        &self,
        context: &str,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<FeedbackRubric, LlmError> {
        let messages = Self::build_messages(feedback_system_prompt(context), history, message);
        let content = self.chat(messages).await?;

        let payload: FeedbackPayload = serde_json::from_str(&content).map_err(|e| {
            LlmError::MalformedResponse(format!("Feedback was not valid JSON: {e}"))
        })?;

        Ok(FeedbackRubric {
            empathy: clamp_score(payload.empathy),
            tone: clamp_score(payload.tone),
            clarity: clamp_score(payload.clarity),
            decision_making: clamp_score(payload.decision_making),
            overall_score: clamp_score(payload.overall_score),
            summary: payload.summary,
            suggestions: payload.suggestions,
        })
    }
}
