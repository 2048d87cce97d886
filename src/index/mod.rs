//! Catalog vector index: embedding client plus in-memory similarity search.

pub mod embed;
pub mod store;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Embedding failed: {0}")]
    Embed(#[from] embed::EmbedError),
    #[error("Invalid query parameters: {0}")]
    InvalidParameters(String),
}

pub use embed::{Embedder, EmbedError, HttpEmbedder};
pub use store::{CatalogIndex, SearchHit, SimilaritySearch};
