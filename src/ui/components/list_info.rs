use dioxus::prelude::*;

use crate::domain::entities::listing::{ActiveFilterSet, SortOption};
use crate::ui::list_view::info::{summary_line, title_line, ListLabels};

#[component]
pub fn EntityListInfo(
    namespace: String,
    active_filter: ActiveFilterSet,
    active_sort: Option<SortOption>,
    search_text: String,
    category_count: usize,
    labels: ListLabels,
) -> Element {
    let title = title_line(&namespace, &labels);
    let subtitle = summary_line(
        &active_filter,
        active_sort.as_ref(),
        &search_text,
        category_count,
        &labels,
    );

    rsx! {
        div { class: "entity-list-info",
            h3 { style: "margin: 4px 0;", "{title}" }
            div { class: "subtitle", style: "color: #555;", "{subtitle}" }
        }
    }
}
