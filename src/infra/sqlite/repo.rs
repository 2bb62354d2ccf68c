use std::path::PathBuf;

use crate::domain::entities::entity::{Entity, EntityPage, EntityQuery};
use crate::error::CatalogError;
use crate::infra::sqlite::queries::{count_entities, insert_entities, query_page};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::catalog::EntityCatalog;

pub struct SqliteCatalog {
    pub db_path: PathBuf,
}

impl SqliteCatalog {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl EntityCatalog for SqliteCatalog {
    fn init(&self) -> Result<(), CatalogError> {
        init_db(&self.db_path).map_err(CatalogError::storage)
    }

    fn query_page(&self, query: &EntityQuery) -> Result<EntityPage, CatalogError> {
        query_page(&self.db_path, query)
    }

    fn insert_entities(&self, entities: &[Entity]) -> Result<usize, CatalogError> {
        insert_entities(&self.db_path, entities).map_err(CatalogError::storage)
    }

    fn count_entities(&self) -> Result<i64, CatalogError> {
        count_entities(&self.db_path).map_err(CatalogError::storage)
    }
}
