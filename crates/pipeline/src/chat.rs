//! The chat completion port.
//!
//! The relay asks a [`ChatProvider`] for one reply per user message. Providers
//! live in infrastructure crates (`llm`); the relay sees only this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ChatError;

/// System instruction sent with every relayed question.
pub const PIPELINE_ASSISTANT_PROMPT: &str =
    "You are a helpful assistant for machine learning pipelines.";

/// Sampling temperature sent with every relayed question.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instruction that frames the assistant's behaviour.
    System,
    /// The end user's question.
    User,
    /// A model reply.
    Assistant,
}

/// One message of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

/// A single-turn completion request. No conversation state is carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// System instruction.
    pub system: String,
    /// The user's message.
    pub user: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl ChatRequest {
    /// Builds the request the relay sends for a user message: fixed pipeline
    /// assistant prompt, fixed temperature.
    pub fn pipeline_assistant(message: impl Into<String>) -> Self {
        Self {
            system: PIPELINE_ASSISTANT_PROMPT.to_string(),
            user: message.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// The request as an ordered message list: system first, then user.
    pub fn messages(&self) -> [ChatMessage; 2] {
        [
            ChatMessage {
                role: ChatRole::System,
                content: self.system.clone(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: self.user.clone(),
            },
        ]
    }
}

/// Reply text produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's answer.
    pub text: String,
}

impl ChatReply {
    /// Wraps reply text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A chat completion backend.
///
/// Implementations make exactly one upstream call per [`ChatProvider::complete`]
/// and never retry.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short name used in logs (e.g. the model identifier).
    fn name(&self) -> &str;

    /// Sends one request upstream and returns the reply text.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}
