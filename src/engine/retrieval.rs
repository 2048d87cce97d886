//! Similarity-search adapter over the catalog index.

use crate::engine::types::RetrievedItem;
use crate::index::{IndexError, SimilaritySearch};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Similarity search failed: {0}")]
    Search(#[from] IndexError),
    #[error("Invalid query parameters: {0}")]
    InvalidParameters(String),
}

#[async_trait::async_trait]
pub trait Retrieving: Send + Sync {
    async fn retrieve(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedItem>, RetrievalError>;
}

/// Read-only adapter: probe text in, ranked catalog items out. Recomputed
/// every turn, never cached.
pub struct Retriever {
    index: Arc<dyn SimilaritySearch>,
}

impl Retriever {
    pub fn new(index: Arc<dyn SimilaritySearch>) -> Self {
        Self { index }
    }
}

#[async_trait::async_trait]
impl Retrieving for Retriever {
    #[instrument(skip(self, query), fields(chars = query.len()))]
    async fn retrieve(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedItem>, RetrievalError> {
        if limit == 0 {
            return Err(RetrievalError::InvalidParameters(
                "limit must be at least 1".to_string(),
            ));
        }

        let hits = self.index.search(query, limit).await?;
        debug!(count = hits.len(), "retrieved similar items");

        Ok(hits
            .into_iter()
            .enumerate()
            .map(|(rank, hit)| RetrievedItem {
                item: hit.item,
                rank,
                score: hit.score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;
    use crate::index::SearchHit;

    struct FixedIndex {
        hits: Vec<SearchHit>,
    }

    #[async_trait::async_trait]
    impl SimilaritySearch for FixedIndex {
        async fn search(&self, _text: &str, limit: usize) -> Result<Vec<SearchHit>, IndexError> {
            Ok(self.hits.iter().take(limit).cloned().collect())
        }
    }

    fn hit(filename: &str, score: f32) -> SearchHit {
        SearchHit {
            item: CatalogItem {
                filename: filename.to_string(),
                title: filename.to_string(),
                size: "M".to_string(),
                gender: "Women".to_string(),
                description: "desc".to_string(),
                category: "Dresses".to_string(),
                item_type: "Evening".to_string(),
            },
            score,
        }
    }

    #[tokio::test]
    async fn ranks_are_assigned_in_order() {
        let retriever = Retriever::new(Arc::new(FixedIndex {
            hits: vec![hit("a.jpg", 0.9), hit("b.jpg", 0.5)],
        }));
        let items = retriever.retrieve("probe", 10).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].rank, 0);
        assert_eq!(items[0].item.filename, "a.jpg");
        assert_eq!(items[1].rank, 1);
        assert_eq!(items[1].item.filename, "b.jpg");
    }

    #[tokio::test]
    async fn zero_limit_is_rejected_before_the_index_is_hit() {
        let retriever = Retriever::new(Arc::new(FixedIndex { hits: Vec::new() }));
        let result = retriever.retrieve("probe", 0).await;
        assert!(matches!(
            result,
            Err(RetrievalError::InvalidParameters(_))
        ));
    }
}
