//! In-memory catalog index: cosine similarity over embedded descriptions.

use crate::catalog::CatalogItem;
use crate::index::embed::Embedder;
use crate::index::IndexError;
use std::sync::Arc;
use tracing::{info, instrument};

/// A catalog item with its similarity score, best-first.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub item: CatalogItem,
    pub score: f32,
}

/// The only contract the conversation core depends on: probe text in,
/// ranked catalog items out. Read-only.
#[async_trait::async_trait]
pub trait SimilaritySearch: Send + Sync {
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<SearchHit>, IndexError>;
}

struct IndexRow {
    item: CatalogItem,
    vector: Vec<f32>,
}

/// Catalog rows and their vectors. Built once at startup, immutable after,
/// so `search` takes `&self` and any number of sessions can share it.
pub struct CatalogIndex {
    embedder: Arc<dyn Embedder>,
    rows: Vec<IndexRow>,
}

impl CatalogIndex {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            rows: Vec::new(),
        }
    }

    /// Embed and store a batch of catalog items.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn add(&mut self, items: Vec<CatalogItem>) -> Result<(), IndexError> {
        let descriptions: Vec<String> =
            items.iter().map(|item| item.description.clone()).collect();
        let vectors = self.embedder.embed_batch(&descriptions).await?;

        self.rows.extend(
            items
                .into_iter()
                .zip(vectors)
                .map(|(item, vector)| IndexRow { item, vector }),
        );
        info!(total = self.rows.len(), "catalog index updated");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cosine(q: &[f32], v: &[f32]) -> f32 {
        let mut dot = 0.0;
        let mut q_norm = 0.0;
        let mut v_norm = 0.0;
        for (&a, &b) in q.iter().zip(v) {
            dot += a * b;
            q_norm += a * a;
            v_norm += b * b;
        }
        dot / (q_norm.sqrt() * v_norm.sqrt()).max(f32::EPSILON)
    }
}

#[async_trait::async_trait]
impl SimilaritySearch for CatalogIndex {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<SearchHit>, IndexError> {
        if limit == 0 {
            return Err(IndexError::InvalidParameters(
                "limit must be at least 1".to_string(),
            ));
        }

        let probe = self.embedder.embed(text).await?;

        // Naive linear scan; the catalog is small and fixed.
        let mut hits: Vec<SearchHit> = self
            .rows
            .iter()
            .map(|row| SearchHit {
                item: row.item.clone(),
                score: Self::cosine(&probe, &row.vector),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }
}
