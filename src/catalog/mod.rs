//! Catalog records: the fixed set of clothing items available for retrieval.

pub mod ingest;

pub use ingest::{load_catalog, IngestError};

use std::path::{Path, PathBuf};

/// One clothing item as ingested from the tabular source.
///
/// Immutable after ingestion. `description` is the text the index embeds;
/// ingestion guarantees it is non-empty. `filename` resolves against the
/// images root chosen at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub filename: String,
    pub title: String,
    pub size: String,
    pub gender: String,
    pub description: String,
    pub category: String,
    pub item_type: String,
}

impl CatalogItem {
    pub fn image_path(&self, images_root: &Path) -> PathBuf {
        images_root.join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_path_joins_root_and_filename() {
        let item = CatalogItem {
            filename: "dress_001.jpg".to_string(),
            title: "Red Dress".to_string(),
            size: "M".to_string(),
            gender: "Women".to_string(),
            description: "A red evening dress".to_string(),
            category: "Dresses".to_string(),
            item_type: "Evening".to_string(),
        };
        assert_eq!(
            item.image_path(Path::new("/data/images")),
            PathBuf::from("/data/images/dress_001.jpg")
        );
    }
}
