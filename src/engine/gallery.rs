//! Gallery rendering for retrieved catalog items.

use crate::engine::types::RetrievedItem;
use std::path::{Path, PathBuf};

/// One rendered gallery cell: a resolvable image path and its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub image_path: PathBuf,
    pub caption: String,
}

/// Render retrieval results best-first. Caption is the item title and
/// description on separate lines.
pub fn render(items: &[RetrievedItem], images_root: &Path) -> Vec<GalleryEntry> {
    items
        .iter()
        .map(|retrieved| GalleryEntry {
            image_path: retrieved.item.image_path(images_root),
            caption: format!("{}\n{}", retrieved.item.title, retrieved.item.description),
        })
        .collect()
}

/// Text reported when the user picks a gallery cell.
pub fn describe_selection(index: usize, value: &str) -> String {
    format!("Selected {value} at index {index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;

    fn retrieved(filename: &str, title: &str, description: &str) -> RetrievedItem {
        RetrievedItem {
            item: CatalogItem {
                filename: filename.to_string(),
                title: title.to_string(),
                size: "M".to_string(),
                gender: "Women".to_string(),
                description: description.to_string(),
                category: "Dresses".to_string(),
                item_type: "Evening".to_string(),
            },
            rank: 0,
            score: 1.0,
        }
    }

    #[test]
    fn renders_one_entry_per_item_with_joined_path_and_caption() {
        let items = vec![
            retrieved("a.jpg", "Red Dress", "A red evening dress"),
            retrieved("b.jpg", "Blue Shirt", "A casual blue shirt"),
        ];
        let gallery = render(&items, Path::new("/data/images"));

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery[0].image_path, PathBuf::from("/data/images/a.jpg"));
        assert_eq!(gallery[0].caption, "Red Dress\nA red evening dress");
        assert_eq!(gallery[1].image_path, PathBuf::from("/data/images/b.jpg"));
        assert_eq!(gallery[1].caption, "Blue Shirt\nA casual blue shirt");
    }

    #[test]
    fn selection_text_names_value_and_index() {
        assert_eq!(
            describe_selection(3, "Red Dress"),
            "Selected Red Dress at index 3"
        );
    }
}
