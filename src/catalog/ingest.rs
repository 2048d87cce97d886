//! One-time CSV ingestion for the clothing catalog.
//!
//! Rows with any missing field are dropped rather than repaired; the dropped
//! count is logged so data-quality loss is visible instead of silent.

use crate::catalog::CatalogItem;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw row shape; every column optional so incomplete rows can be detected
/// and counted instead of failing the whole load.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Filename")]
    filename: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Size")]
    size: Option<String>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Type")]
    item_type: Option<String>,
}

impl RawRow {
    fn into_item(self) -> Option<CatalogItem> {
        Some(CatalogItem {
            filename: non_empty(self.filename)?,
            title: non_empty(self.title)?,
            size: non_empty(self.size)?,
            gender: non_empty(self.gender)?,
            description: non_empty(self.description)?,
            category: non_empty(self.category)?,
            item_type: non_empty(self.item_type)?,
        })
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Load and clean the catalog. Every surviving row has all seven fields
/// populated as text.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>, IngestError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut items = Vec::new();
    let mut dropped = 0usize;
    for row in reader.deserialize::<RawRow>() {
        match row?.into_item() {
            Some(item) => items.push(item),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "dropped catalog rows with missing fields");
    }
    info!(loaded = items.len(), "catalog loaded");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const HEADER: &str = "Filename,Title,Size,Gender,Description,Category,Type\n";

    #[test]
    fn loads_complete_rows_verbatim() {
        let file = write_csv(&format!(
            "{HEADER}a.jpg,Red Dress,M,Women,A red evening dress,Dresses,Evening\n"
        ));
        let items = load_catalog(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "a.jpg");
        assert_eq!(items[0].title, "Red Dress");
        assert_eq!(items[0].description, "A red evening dress");
        assert_eq!(items[0].item_type, "Evening");
    }

    #[test]
    fn drops_rows_with_missing_fields() {
        let file = write_csv(&format!(
            "{HEADER}\
             a.jpg,Red Dress,M,Women,A red evening dress,Dresses,Evening\n\
             b.jpg,,M,Men,A blue shirt,Shirts,Casual\n\
             c.jpg,Green Coat,L,Women,,Coats,Winter\n"
        ));
        let items = load_catalog(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "a.jpg");
    }

    #[test]
    fn empty_file_yields_empty_catalog() {
        let file = write_csv(HEADER);
        let items = load_catalog(file.path()).unwrap();
        assert!(items.is_empty());
    }
}
