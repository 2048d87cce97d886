//! Prompt composition and chat completion for conversational turns.

use crate::engine::types::Turn;
use crate::llm::{ChatMessage, CompletionClient, CompletionError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{instrument, warn};

pub const SYSTEM_PROMPT: &str = "You are a helpful fashion assistant.";

/// Appended to the outgoing user message only; the turn recorded in history
/// carries the verbatim input.
const RESPONSE_DIRECTIVE: &str =
    ". START YOUR MESSAGE DIRECTLY WITH A RESPONSE LIST. DO NOT REPEAT THE NAME OF THE ITEM MENTIONED IN THE QUERY.";

const REWRITE_SYSTEM_PROMPT: &str =
    "You are a helpful fashion assistant. Rewrite the user's query to include details from the item description.";

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Chat completion failed: {0}")]
    Completion(#[from] CompletionError),
}

#[async_trait::async_trait]
pub trait Responding: Send + Sync {
    /// Obtain the next assistant message for `history` + `user_message`.
    /// History ordering is preserved exactly; no truncation or dedup.
    async fn respond(&self, history: &[Turn], user_message: &str)
        -> Result<String, ConversationError>;
}

pub struct ConversationEngine {
    client: Arc<CompletionClient>,
    model: String,
}

impl ConversationEngine {
    pub fn new(client: Arc<CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn compose(history: &[Turn], user_message: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() * 2 + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        for turn in history {
            messages.push(ChatMessage::user(&turn.user));
            messages.push(ChatMessage::assistant(&turn.assistant));
        }
        messages.push(ChatMessage::user(format!(
            "{user_message}{RESPONSE_DIRECTIVE}"
        )));
        messages
    }

    /// Fold item details into a user query. Falls back to the original
    /// query on any service error, so callers need no error path.
    #[instrument(skip(self, original_query, item_description))]
    pub async fn rewrite_query(&self, original_query: &str, item_description: &str) -> String {
        let messages = vec![
            ChatMessage::system(REWRITE_SYSTEM_PROMPT),
            ChatMessage::user(format!("Item description: {item_description}")),
            ChatMessage::user(format!("User query: {original_query}")),
            ChatMessage::user(
                "Please rewrite the query to include relevant details from the item description.",
            ),
        ];

        match self.client.complete(&self.model, messages).await {
            Ok(rewritten) => rewritten,
            Err(e) => {
                warn!(error = %e, "query rewrite failed; keeping original query");
                original_query.to_string()
            }
        }
    }
}

#[async_trait::async_trait]
impl Responding for ConversationEngine {
    #[instrument(skip(self, history, user_message), fields(history_len = history.len()))]
    async fn respond(
        &self,
        history: &[Turn],
        user_message: &str,
    ) -> Result<String, ConversationError> {
        let messages = Self::compose(history, user_message);
        Ok(self.client.complete(&self.model, messages).await?)
    }
}
