use std::sync::Arc;

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

use crate::config::ConsoleConfig;
use crate::domain::entities::entity::{default_filter_options, default_sort_options};
use crate::domain::entities::listing::{
    FilterOption, ListViewConfig, PaginationState, SortOption,
};
use crate::ui::components::entity_table::EntityTable;
use crate::ui::components::list_header::EntityListHeader;
use crate::ui::components::list_info::EntityListInfo;
use crate::ui::state::app_state::AppState;
use crate::usecase::services::query_service::{ListQuery, QueryService};

/// Everything the root component needs, built once in `main` and handed
/// to the tree through context.
#[derive(Clone)]
pub struct ConsoleContext {
    pub config: ConsoleConfig,
    pub query_service: Arc<QueryService>,
}

/// Builds what the list header receives from the view that owns `query`.
pub fn header_config(
    query: &ListQuery,
    pagination: PaginationState,
    filter_options: Vec<FilterOption>,
    sort_options: Vec<SortOption>,
) -> ListViewConfig {
    ListViewConfig {
        filter_options,
        active_filter: query.active_filter.clone(),
        sort_options,
        active_sort: query.active_sort.clone(),
        // Search results come back in relevance order.
        is_sort_disabled: query.has_search(),
        is_search_disabled: false,
        search_text: query.search_text.clone(),
        pagination,
    }
}

#[component]
pub fn App() -> Element {
    let ConsoleContext {
        config,
        query_service,
    } = use_context::<ConsoleContext>();

    let AppState {
        mut query,
        mut entities,
        mut pagination,
        mut busy,
        mut status,
    } = AppState::new();

    let page_size = config.page_size;
    use_effect(move || {
        let current = query();
        *busy.write() = true;
        match query_service.load(&current, page_size) {
            Ok(listing) => {
                info!(
                    total = listing.pagination.number_of_entities,
                    page = listing.pagination.current_page,
                    "entity list refreshed"
                );
                *status.write() = format!(
                    "Page {} of {}",
                    listing.pagination.current_page,
                    listing.pagination.number_of_pages.max(1)
                );
                if listing.pagination.current_page != current.current_page {
                    query.write().current_page = listing.pagination.current_page;
                }
                entities.set(listing.entities);
                pagination.set(listing.pagination);
            }
            Err(err) => {
                warn!(error = %err, "entity list refresh failed");
                entities.set(Vec::new());
                pagination.set(PaginationState::default());
                *status.write() = format!("Failed to load entities: {err}");
            }
        }
        *busy.write() = false;
    });

    let current_query = query();
    let list_config = header_config(
        &current_query,
        pagination(),
        default_filter_options(),
        default_sort_options(),
    );
    let labels = config.labels.clone();
    let empty_label = if busy() { "Loading…" } else { "No entities match." };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100vh; padding: 12px; box-sizing: border-box; font-family: sans-serif;",
            EntityListInfo {
                namespace: config.namespace.clone(),
                active_filter: current_query.active_filter.clone(),
                active_sort: current_query.active_sort.clone(),
                search_text: current_query.search_text.clone(),
                category_count: config.category_count,
                labels: labels.clone(),
            }
            EntityListHeader {
                config: list_config,
                labels: labels,
                debounce: config.search_debounce(),
                count_marker: config.count_marker,
                on_search: move |text: String| query.write().search(&text),
                on_filter_click: move |option: FilterOption| query.write().toggle_filter(&option.id),
                on_sort_click: move |option: SortOption| query.write().select_sort(&option),
                on_page_change: move |page: usize| query.write().set_page(page),
            }
            EntityTable {
                entities: entities(),
                empty_label: empty_label.to_string(),
            }
            div { style: "padding-top: 8px; color: #666; font-size: 12px;", "{status}" }
        }
    }
}
