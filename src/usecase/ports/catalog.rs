use crate::domain::entities::entity::{Entity, EntityPage, EntityQuery};
use crate::error::CatalogError;

/// Data source behind the entity list.
pub trait EntityCatalog: Send + Sync {
    fn init(&self) -> Result<(), CatalogError>;

    fn query_page(&self, query: &EntityQuery) -> Result<EntityPage, CatalogError>;
    fn insert_entities(&self, entities: &[Entity]) -> Result<usize, CatalogError>;
    fn count_entities(&self) -> Result<i64, CatalogError>;
}
