use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::entity::Entity;
use crate::domain::entities::listing::PaginationState;
use crate::usecase::services::query_service::ListQuery;

/// Signals owned by the entity list view. `query` is the authoritative
/// list query; the rest is what the last load returned.
pub struct AppState {
    pub query: Signal<ListQuery>,
    pub entities: Signal<Vec<Entity>>,
    pub pagination: Signal<PaginationState>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            query: use_signal(ListQuery::default),
            entities: use_signal(Vec::<Entity>::new),
            pagination: use_signal(PaginationState::default),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
