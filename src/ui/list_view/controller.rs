use std::time::{Duration, Instant};

use dioxus::logger::tracing::debug;
use serde::{Deserialize, Serialize};

use crate::domain::entities::listing::{FilterOption, ListViewConfig, SortOption};
use crate::ui::list_view::debounce::DebounceTimer;
use crate::ui::list_view::info::{summary_line, ListLabels};
use crate::ui::list_view::paginator::{paginate_default, PaginatorView};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Callbacks the list header raises towards the view that owns the query.
pub trait ListViewEvents {
    fn on_search(&mut self, text: &str);
    fn on_filter_click(&mut self, option: &FilterOption);
    fn on_sort_click(&mut self, option: &SortOption);
    /// `page` is 1-based.
    fn on_page_change(&mut self, page: usize);
}

/// When the entity count gets its trailing `+`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMarker {
    /// Whenever the count is non-zero.
    #[default]
    Always,
    /// Only when the list spans more than one page.
    WhenPaginated,
}

/// Open/closed state of the header's popups. Never touched by
/// re-configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownFlags {
    pub filter_expanded: bool,
    pub sort_expanded: bool,
    pub sort_tooltip_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationZone {
    Hidden,
    CountOnly { count_label: String },
    Paged {
        count_label: String,
        paginator: PaginatorView,
    },
}

#[derive(Debug, Clone)]
pub struct ListViewController {
    config: ListViewConfig,
    search_text: String,
    flags: DropdownFlags,
    close_sort_on_refresh: bool,
    search_timer: DebounceTimer<()>,
    debounce: Duration,
    count_marker: CountMarker,
}

impl ListViewController {
    pub fn new(config: ListViewConfig, debounce: Duration, count_marker: CountMarker) -> Self {
        let config = config.normalized();
        Self {
            search_text: config.search_text.clone(),
            config,
            flags: DropdownFlags::default(),
            close_sort_on_refresh: false,
            search_timer: DebounceTimer::new(),
            debounce,
            count_marker,
        }
    }

    /// Replaces the mirrored query state with a fresh delivery from the
    /// parent. Dropdown flags stay as they are, except that a sort picked
    /// since the last delivery closes the sort dropdown now. A pending
    /// search is dropped once search becomes disabled.
    pub fn configure(&mut self, config: ListViewConfig) {
        let config = config.normalized();
        self.search_text = config.search_text.clone();
        self.config = config;
        if self.config.is_search_disabled && self.search_timer.cancel().is_some() {
            debug!("pending search dropped, search disabled");
        }
        if self.close_sort_on_refresh {
            self.flags.sort_expanded = false;
            self.close_sort_on_refresh = false;
        }
    }

    /// Records a keystroke and restarts the quiet period. Returns `false`
    /// when search is disabled and the edit was ignored.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) -> bool {
        if self.config.is_search_disabled {
            return false;
        }
        self.search_text = text.into();
        self.search_timer.schedule(now, self.debounce, ());
        debug!(deadline_ms = self.debounce.as_millis() as u64, "search debounce armed");
        true
    }

    /// Emits the debounced search once its quiet period is over, carrying
    /// the search text held at that moment. Returns whether an event was
    /// raised.
    pub fn poll(&mut self, now: Instant, events: &mut impl ListViewEvents) -> bool {
        if self.search_timer.fire_due(now).is_none() {
            return false;
        }
        debug!(search = %self.search_text, "search debounce fired");
        events.on_search(&self.search_text);
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.search_timer.deadline()
    }

    pub fn toggle_filter(&mut self, option: &FilterOption, events: &mut impl ListViewEvents) {
        debug!(filter = %option.id, "filter clicked");
        events.on_filter_click(option);
    }

    pub fn toggle_sort(&mut self, option: &SortOption, events: &mut impl ListViewEvents) {
        if self.config.is_sort_disabled {
            return;
        }
        debug!(sort = %option.full_sort, "sort clicked");
        self.close_sort_on_refresh = true;
        events.on_sort_click(option);
    }

    /// Translates the paginator's 0-based index into a page number.
    pub fn change_page(&mut self, ui_page_index: usize, events: &mut impl ListViewEvents) {
        let clicked = ui_page_index + 1;
        debug!(page = clicked, "page change requested");
        events.on_page_change(clicked);
    }

    pub fn toggle_filter_dropdown(&mut self) {
        self.flags.filter_expanded = !self.flags.filter_expanded;
    }

    pub fn toggle_sort_dropdown(&mut self) {
        if self.config.is_sort_disabled {
            return;
        }
        self.flags.sort_expanded = !self.flags.sort_expanded;
    }

    /// The tooltip explains why sorting is unavailable, so it only opens
    /// while sorting is disabled.
    pub fn set_sort_tooltip(&mut self, open: bool) {
        self.flags.sort_tooltip_open = open && self.config.is_sort_disabled;
    }

    pub fn config(&self) -> &ListViewConfig {
        &self.config
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_filter_expanded(&self) -> bool {
        self.flags.filter_expanded
    }

    pub fn is_sort_expanded(&self) -> bool {
        self.flags.sort_expanded && !self.config.is_sort_disabled
    }

    pub fn is_sort_tooltip_open(&self) -> bool {
        self.flags.sort_tooltip_open && self.config.is_sort_disabled
    }

    pub fn is_filter_checked(&self, id: &str) -> bool {
        self.config.active_filter.contains(id)
    }

    pub fn is_sort_active(&self, option: &SortOption) -> bool {
        self.config
            .active_sort
            .as_ref()
            .is_some_and(|active| active.same_sort(option))
    }

    pub fn sort_label(&self, labels: &ListLabels) -> String {
        self.config
            .active_sort
            .as_ref()
            .map(|sort| sort.display_name.clone())
            .unwrap_or_else(|| labels.relevance.clone())
    }

    pub fn count_label(&self, labels: &ListLabels) -> String {
        let pagination = &self.config.pagination;
        let marker = match self.count_marker {
            CountMarker::Always => pagination.number_of_entities > 0,
            CountMarker::WhenPaginated => pagination.is_paginated(),
        };
        let suffix = if marker { "+" } else { "" };
        format!(
            "{}{suffix} {}",
            pagination.number_of_entities, labels.entities
        )
    }

    pub fn pagination_zone(&self, labels: &ListLabels) -> PaginationZone {
        let pagination = &self.config.pagination;
        if pagination.number_of_entities == 0 || pagination.number_of_pages == 0 {
            return PaginationZone::Hidden;
        }
        let count_label = self.count_label(labels);
        if !pagination.is_paginated() {
            return PaginationZone::CountOnly { count_label };
        }
        PaginationZone::Paged {
            count_label,
            paginator: paginate_default(pagination.number_of_pages, pagination.current_page),
        }
    }

    pub fn summary(&self, category_count: usize, labels: &ListLabels) -> String {
        summary_line(
            &self.config.active_filter,
            self.config.active_sort.as_ref(),
            &self.config.search_text,
            category_count,
            labels,
        )
    }
}
