//! Gemini chat client
//!
//! Sends the conversation to Google's `generateContent` endpoint with Karu's
//! persona as the system instruction.

use crate::types::message::{Message, Role};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const SYSTEM_INSTRUCTION: &str = "You are a cute and friendly fox named Karu, a desktop pet living on the user's screen. \
You are supportive user's best friend and always ready to help. \
Reply concisely with a slightly sassy, clever, and cute fox personality. \
Occasionally use words like '*Yip*', '*Flickers ear*', 'Hmph', '*Chuffs*', '*Purr*. \
Never say you are an AI model or a language model. You are a fox named Karu.";

pub const MISSING_KEY_MESSAGE: &str = "GEMINI_API_KEY is missing. Please set it in your .env file.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("GEMINI_API_KEY is missing")]
    MissingApiKey,
    #[error("Network Error: {0}")]
    Network(String),
    #[error("API Error: {0}")]
    Api(String),
    #[error("Received empty response from server.")]
    EmptyResponse,
    #[error("Received an unexpected response.")]
    UnexpectedResponse,
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

// ============================================================================
// Gemini API types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// Build the request body from the chat history.
///
/// Only user and model turns are sent; local error notices stay local.
pub fn build_request(history: &[Message]) -> GenerateRequest {
    let contents = history
        .iter()
        .filter_map(|msg| {
            msg.role.api_role().map(|role| Content {
                role: Some(role.to_string()),
                parts: vec![Part {
                    text: msg.content.clone(),
                }],
            })
        })
        .collect();

    GenerateRequest {
        contents,
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_p: 0.9,
        },
    }
}

/// Pull the reply text out of a raw response body
pub fn parse_response(body: &str) -> Result<String, ChatError> {
    if body.trim().is_empty() {
        return Err(ChatError::EmptyResponse);
    }

    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ChatError::Parse(e.to_string()))?;

    if let Some(candidates) = response.candidates {
        return candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| ChatError::Parse("candidate has no text".to_string()));
    }

    if let Some(error) = response.error {
        return Err(ChatError::Api(
            error.message.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    Err(ChatError::UnexpectedResponse)
}

// ============================================================================
// Providers
// ============================================================================

/// Anything that can answer a conversation
#[async_trait]
pub trait ChatProvider {
    async fn generate(&self, history: &[Message]) -> Result<String, ChatError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Client configured from `GEMINI_API_KEY` and optional `GEMINI_MODEL`
    pub fn from_env() -> Result<Self, ChatError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ChatError::MissingApiKey)?;
        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }
}

#[async_trait]
impl ChatProvider for GeminiClient {
    async fn generate(&self, history: &[Message]) -> Result<String, ChatError> {
        let request = build_request(history);
        tracing::debug!("Sending {} turns to {}", request.contents.len(), self.model);

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.without_url().to_string()))?;

        match parse_response(&body) {
            Ok(text) => Ok(text),
            Err(ChatError::UnexpectedResponse | ChatError::Parse(_) | ChatError::EmptyResponse)
                if !status.is_success() =>
            {
                Err(ChatError::Network(status.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Conversation shown in the chat window
#[derive(Debug, Default, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Record the user's line, returning false for blank input
    pub fn push_user(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(Message::user(text));
        true
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.messages.push(Message::error(text));
    }

    /// Store the outcome of a request. Only successful replies join the history.
    pub fn apply_reply(&mut self, reply: Result<String, ChatError>) {
        match reply {
            Ok(text) => self.messages.push(Message::model(text)),
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                self.messages.push(Message::error(e.to_string()));
            }
        }
    }
}
