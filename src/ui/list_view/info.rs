use serde::{Deserialize, Serialize};

use crate::domain::entities::listing::{ActiveFilterSet, SortOption};

/// User-facing phrases used by the list header and the summary line.
/// Any phrase left out of the configuration keeps its English default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListLabels {
    pub title: String,
    pub search: String,
    pub filtered_by: String,
    pub sorted_by: String,
    pub display_all: String,
    pub display_some: String,
    pub relevance: String,
    pub filter_by: String,
    pub sort_label: String,
    pub search_placeholder: String,
    pub entities: String,
    pub sort_disabled_tooltip: String,
}

impl Default for ListLabels {
    fn default() -> Self {
        Self {
            title: "Entities in".to_string(),
            search: "Searching".to_string(),
            filtered_by: "filtered by".to_string(),
            sorted_by: "sorted by".to_string(),
            display_all: "Displaying all".to_string(),
            display_some: "Displaying".to_string(),
            relevance: "Relevance".to_string(),
            filter_by: "Filter by".to_string(),
            sort_label: "Sort:".to_string(),
            search_placeholder: "Search entities".to_string(),
            entities: "Entities".to_string(),
            sort_disabled_tooltip: "Sorting is not available while searching".to_string(),
        }
    }
}

/// Category name for a filter id: first letter upper-cased, plural `s`.
pub fn category_label(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// An empty selection and a complete one both mean "every category".
pub fn all_categories_selected(selected: usize, category_count: usize) -> bool {
    selected == 0 || selected == category_count
}

pub fn title_line(namespace: &str, labels: &ListLabels) -> String {
    format!("{} \"{namespace}\"", labels.title)
}

/// One-line description of what the list currently shows.
pub fn summary_line(
    active_filter: &ActiveFilterSet,
    active_sort: Option<&SortOption>,
    search_text: &str,
    category_count: usize,
    labels: &ListLabels,
) -> String {
    let all_selected = all_categories_selected(active_filter.len(), category_count);
    let categories = active_filter
        .ids()
        .iter()
        .map(|id| category_label(id))
        .collect::<Vec<_>>()
        .join(", ");

    let search_text = search_text.trim();
    if !search_text.is_empty() {
        let mut line = format!("{} \"{search_text}\"", labels.search);
        if !all_selected {
            line.push_str(&format!(", {} {categories}", labels.filtered_by));
        }
        return line;
    }

    let mut line = if all_selected {
        labels.display_all.clone()
    } else {
        format!("{} {categories}", labels.display_some)
    };
    if let Some(sort) = active_sort {
        line.push_str(&format!(", {} {}", labels.sorted_by, sort.display_name));
    }
    line
}
