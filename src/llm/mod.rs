//! Chat completion plumbing: wire schema and the HTTP client.

pub mod client;
pub mod schema;

pub use client::{CompletionClient, CompletionError};
pub use schema::{ChatMessage, CompletionRequest, CompletionResponse, ContentPart, MessageContent};
