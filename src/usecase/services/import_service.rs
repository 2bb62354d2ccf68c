use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use dioxus::logger::tracing::info;

use crate::infra::import::csv::read_entities_csv;
use crate::usecase::ports::catalog::EntityCatalog;

pub struct ImportService {
    catalog: Arc<dyn EntityCatalog>,
}

impl ImportService {
    pub fn new(catalog: Arc<dyn EntityCatalog>) -> Self {
        Self { catalog }
    }

    pub fn import_csv(&self, path: &Path) -> Result<usize> {
        let entities = read_entities_csv(path)?;
        let inserted = self.catalog.insert_entities(&entities)?;
        info!(count = inserted, path = %path.display(), "imported entities");
        Ok(inserted)
    }

    /// Imports `path` only when the catalog holds no entities yet.
    pub fn seed_if_empty(&self, path: &Path) -> Result<Option<usize>> {
        if self.catalog.count_entities()? > 0 {
            return Ok(None);
        }
        self.import_csv(path).map(Some)
    }
}
