use std::sync::Arc;

use dioxus::logger::tracing::debug;

use crate::domain::entities::entity::{Entity, EntityKind, EntityQuery, EntitySort};
use crate::domain::entities::listing::{
    page_count, ActiveFilterSet, PaginationState, SortOption,
};
use crate::error::CatalogError;
use crate::usecase::ports::catalog::EntityCatalog;

/// The list query owned by the entity list view. Every edit that narrows
/// or reorders the list sends the user back to page 1. Searching always
/// orders by relevance, so a non-empty search drops the active sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search_text: String,
    pub active_filter: ActiveFilterSet,
    pub active_sort: Option<SortOption>,
    pub current_page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_filter: ActiveFilterSet::new(),
            active_sort: None,
            current_page: 1,
        }
    }
}

impl ListQuery {
    pub fn search(&mut self, text: &str) {
        self.search_text = text.to_string();
        if self.has_search() {
            self.active_sort = None;
        }
        self.current_page = 1;
    }

    /// Whitespace-only text does not narrow the catalog query.
    pub fn has_search(&self) -> bool {
        !self.search_text.trim().is_empty()
    }

    pub fn toggle_filter(&mut self, id: &str) {
        self.active_filter.toggle(id);
        self.current_page = 1;
    }

    /// Picking the active sort again goes back to relevance ordering.
    pub fn select_sort(&mut self, option: &SortOption) {
        let is_active = self
            .active_sort
            .as_ref()
            .is_some_and(|active| active.same_sort(option));
        self.active_sort = if is_active { None } else { Some(option.clone()) };
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    fn to_entity_query(&self, page: usize, page_size: usize) -> EntityQuery {
        EntityQuery {
            search: self.search_text.clone(),
            kinds: self
                .active_filter
                .ids()
                .iter()
                .filter_map(|id| id.parse::<EntityKind>().ok())
                .collect(),
            sort: self.active_sort.as_ref().map(EntitySort::from),
            page: page as i64,
            page_size: page_size as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub entities: Vec<Entity>,
    pub pagination: PaginationState,
}

pub struct QueryService {
    catalog: Arc<dyn EntityCatalog>,
}

impl QueryService {
    pub fn new(catalog: Arc<dyn EntityCatalog>) -> Self {
        Self { catalog }
    }

    /// Loads the page `query` points at. A page past the end is answered
    /// with the last page instead.
    pub fn load(&self, query: &ListQuery, page_size: usize) -> Result<Listing, CatalogError> {
        let page_size = page_size.max(1);
        let requested = query.current_page.max(1);
        let mut page = self
            .catalog
            .query_page(&query.to_entity_query(requested, page_size))?;

        let total = usize::try_from(page.total).unwrap_or(0);
        let number_of_pages = page_count(total, page_size);
        let mut current_page = requested;
        if number_of_pages > 0 && requested > number_of_pages {
            debug!(requested, last = number_of_pages, "page past the end, loading last page");
            current_page = number_of_pages;
            page = self
                .catalog
                .query_page(&query.to_entity_query(current_page, page_size))?;
        }

        Ok(Listing {
            entities: page.entities,
            pagination: PaginationState {
                current_page,
                number_of_pages,
                number_of_entities: total,
            }
            .normalized(),
        })
    }
}
