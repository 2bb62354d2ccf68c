use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterOption {
    pub id: String,
    pub display_name: String,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable ordering. Two options are the same ordering when their
/// `full_sort` keys match, whatever their display names say.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortOption {
    pub display_name: String,
    pub sort_field: String,
    pub sort_order: SortOrder,
    pub full_sort: String,
}

impl SortOption {
    pub fn new(
        display_name: impl Into<String>,
        sort_field: impl Into<String>,
        sort_order: SortOrder,
    ) -> Self {
        let sort_field = sort_field.into();
        let full_sort = format!("{sort_field}_{sort_order}");
        Self {
            display_name: display_name.into(),
            sort_field,
            sort_order,
            full_sort,
        }
    }

    pub fn same_sort(&self, other: &SortOption) -> bool {
        self.full_sort == other.full_sort
    }
}

/// Ids of the selected filter options. Insertion order is kept so the
/// summary line lists categories in the order they were picked; equality
/// ignores it.
#[derive(Debug, Clone, Default)]
pub struct ActiveFilterSet {
    ids: Vec<String>,
}

impl PartialEq for ActiveFilterSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ids.iter().all(|id| other.contains(id))
    }
}

impl Eq for ActiveFilterSet {}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// Adds the id when absent, removes it when present. Returns whether
    /// the id is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Drops every id that is not among `options`.
    pub fn retain_known(&mut self, options: &[FilterOption]) {
        self.ids
            .retain(|id| options.iter().any(|option| &option.id == id));
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ActiveFilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ActiveFilterSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub number_of_pages: usize,
    pub number_of_entities: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            number_of_pages: 0,
            number_of_entities: 0,
        }
    }
}

impl PaginationState {
    /// Pulls `current_page` back into `1..=max(number_of_pages, 1)`.
    pub fn normalized(self) -> Self {
        let last_page = self.number_of_pages.max(1);
        Self {
            current_page: self.current_page.clamp(1, last_page),
            ..self
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.number_of_pages > 1
    }
}

/// Everything the parent view hands to the list header on each delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListViewConfig {
    pub filter_options: Vec<FilterOption>,
    pub active_filter: ActiveFilterSet,
    pub sort_options: Vec<SortOption>,
    pub active_sort: Option<SortOption>,
    pub is_sort_disabled: bool,
    pub is_search_disabled: bool,
    pub search_text: String,
    pub pagination: PaginationState,
}

impl ListViewConfig {
    /// Returns the configuration with its invariants restored: unknown
    /// filter ids are dropped and the current page is clamped.
    pub fn normalized(mut self) -> Self {
        self.active_filter.retain_known(&self.filter_options);
        self.pagination = self.pagination.normalized();
        self
    }
}

/// Number of pages needed to show `total` entities, `page_size` at a time.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
