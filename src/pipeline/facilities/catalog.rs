use std::path::Path;

use super::CatalogError;
use crate::models::RecyclerRecord;

/// Read-only facility catalog, loaded once at startup and shared by
/// reference with every request.
#[derive(Debug, Clone, Default)]
pub struct FacilityCatalog {
    records: Vec<RecyclerRecord>,
}

impl FacilityCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            facilities = catalog.len(),
            "Facility catalog loaded"
        );
        if catalog.is_empty() {
            tracing::warn!(path = %path.display(), "Facility catalog is empty");
        }
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let records: Vec<RecyclerRecord> = serde_json::from_str(raw)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<RecyclerRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RecyclerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&RecyclerRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}
