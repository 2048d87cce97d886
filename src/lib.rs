//! # Arachne
//!
//! Retrieval-augmented conversation core for a multimodal clothing
//! assistant. A user supplies a clothing photo or a chat message; the
//! engine captions images with a vision model, keeps an append-only
//! conversation history, probes a vector index of catalog descriptions,
//! and renders the matches as a gallery alongside each assistant reply.
//!
//! ```text
//! user event → Orchestrator → (Captioner) → ConversationEngine → Retriever → TurnOutcome
//! ```
//!
//! The embedding service and the completion service are external; this
//! crate only ships the adapters (`index::HttpEmbedder`,
//! `llm::CompletionClient`) and the orchestration around them.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod index;
pub mod llm;

pub use catalog::{load_catalog, CatalogItem};
pub use config::Config;
pub use engine::{ConversationState, GalleryEntry, Orchestrator, Turn, TurnOutcome};
