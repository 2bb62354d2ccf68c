use std::time::{Duration, Instant};

use dioxus::prelude::*;

use crate::domain::entities::listing::{FilterOption, ListViewConfig, SortOption};
use crate::ui::list_view::controller::{
    CountMarker, ListViewController, ListViewEvents, PaginationZone,
};
use crate::ui::list_view::info::ListLabels;
use crate::ui::list_view::paginator::{PageItem, PaginatorView};

const TOGGLE_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer; min-width: 140px; text-align: left;";
const MENU_STYLE: &str = "position: absolute; left: 0; top: 32px; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;";

#[derive(Clone, Copy, PartialEq)]
struct HeaderEvents {
    on_search: EventHandler<String>,
    on_filter_click: EventHandler<FilterOption>,
    on_sort_click: EventHandler<SortOption>,
    on_page_change: EventHandler<usize>,
}

impl ListViewEvents for HeaderEvents {
    fn on_search(&mut self, text: &str) {
        self.on_search.call(text.to_string());
    }

    fn on_filter_click(&mut self, option: &FilterOption) {
        self.on_filter_click.call(option.clone());
    }

    fn on_sort_click(&mut self, option: &SortOption) {
        self.on_sort_click.call(option.clone());
    }

    fn on_page_change(&mut self, page: usize) {
        self.on_page_change.call(page);
    }
}

#[component]
pub fn EntityListHeader(
    config: ListViewConfig,
    labels: ListLabels,
    debounce: Duration,
    count_marker: CountMarker,
    on_search: EventHandler<String>,
    on_filter_click: EventHandler<FilterOption>,
    on_sort_click: EventHandler<SortOption>,
    on_page_change: EventHandler<usize>,
) -> Element {
    let initial = config.clone();
    let mut controller =
        use_signal(move || ListViewController::new(initial, debounce, count_marker));
    let events = HeaderEvents {
        on_search,
        on_filter_click,
        on_sort_click,
        on_page_change,
    };

    use_effect(use_reactive((&config,), move |(config,)| {
        controller.write().configure(config);
    }));

    let ctrl = controller.read();
    let search_disabled = ctrl.config().is_search_disabled;
    let sort_disabled = ctrl.config().is_sort_disabled;
    let search_value = ctrl.search_text().to_string();
    let sort_label = ctrl.sort_label(&labels);
    let filter_open = ctrl.is_filter_expanded();
    let sort_open = ctrl.is_sort_expanded();
    let tooltip_open = ctrl.is_sort_tooltip_open();
    let filter_rows: Vec<(FilterOption, bool)> = ctrl
        .config()
        .filter_options
        .iter()
        .map(|option| (option.clone(), ctrl.is_filter_checked(&option.id)))
        .collect();
    let sort_rows: Vec<(SortOption, bool)> = ctrl
        .config()
        .sort_options
        .iter()
        .map(|option| (option.clone(), ctrl.is_sort_active(option)))
        .collect();
    let zone = ctrl.pagination_zone(&labels);
    drop(ctrl);

    let pagination = match zone {
        PaginationZone::Hidden => rsx! {},
        PaginationZone::CountOnly { count_label } => rsx! {
            span { class: "total-entities", "{count_label}" }
        },
        PaginationZone::Paged {
            count_label,
            paginator,
        } => rsx! {
            span { class: "total-entities", "{count_label}" }
            Paginator { view: paginator, controller, events }
        },
    };

    rsx! {
        div {
            class: "entity-list-header",
            style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
            div { class: "search-box",
                input {
                    r#type: "text",
                    placeholder: "{labels.search_placeholder}",
                    disabled: search_disabled,
                    value: "{search_value}",
                    oninput: move |event| {
                        let accepted = controller.write().set_search_text(event.value(), Instant::now());
                        if !accepted {
                            return;
                        }
                        let Some(deadline) = controller.read().next_deadline() else {
                            return;
                        };
                        let mut events = events;
                        spawn(async move {
                            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
                            controller.write().poll(Instant::now(), &mut events);
                        });
                    }
                }
            }

            div { class: "filter", style: "position: relative;",
                button {
                    style: TOGGLE_STYLE,
                    onclick: move |event| {
                        event.stop_propagation();
                        controller.write().toggle_filter_dropdown();
                    },
                    "{labels.filter_by} ▾"
                }
                if filter_open {
                    div {
                        style: MENU_STYLE,
                        onclick: move |event| event.stop_propagation(),
                        for (option, checked) in filter_rows {
                            label {
                                key: "{option.id}",
                                style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                                onclick: move |event| event.stop_propagation(),
                                input {
                                    r#type: "checkbox",
                                    checked: checked,
                                    onchange: {
                                        let option = option.clone();
                                        move |_| {
                                            let mut events = events;
                                            controller.write().toggle_filter(&option, &mut events);
                                        }
                                    }
                                }
                                span { "{option.display_name}" }
                            }
                        }
                    }
                }
            }

            div { class: "sort", style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
                span { class: "sort-label", "{labels.sort_label}" }
                button {
                    style: TOGGLE_STYLE,
                    disabled: sort_disabled,
                    onclick: move |event| {
                        event.stop_propagation();
                        controller.write().toggle_sort_dropdown();
                    },
                    onmouseenter: move |_| controller.write().set_sort_tooltip(true),
                    onmouseleave: move |_| controller.write().set_sort_tooltip(false),
                    "{sort_label} ▾"
                }
                if tooltip_open {
                    div {
                        style: "position: absolute; left: 0; top: -30px; background: #333; color: #fff; padding: 4px 8px; border-radius: 4px; white-space: nowrap;",
                        "{labels.sort_disabled_tooltip}"
                    }
                }
                if sort_open {
                    div {
                        style: MENU_STYLE,
                        for (option, active) in sort_rows {
                            div {
                                key: "{option.full_sort}",
                                style: "padding: 8px 10px; cursor: pointer; display: flex; justify-content: space-between;",
                                onclick: {
                                    let option = option.clone();
                                    move |_| {
                                        let mut events = events;
                                        controller.write().toggle_sort(&option, &mut events);
                                    }
                                },
                                span { "{option.display_name}" }
                                if active {
                                    span { "✓" }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "pagination", style: "margin-left: auto; display: flex; gap: 8px; align-items: center;",
                {pagination}
            }
        }
    }
}

#[component]
fn Paginator(
    view: PaginatorView,
    mut controller: Signal<ListViewController>,
    events: HeaderEvents,
) -> Element {
    let selected = view.selected;

    rsx! {
        ul {
            class: "page-list",
            style: "display: flex; gap: 4px; list-style: none; margin: 0; padding: 0;",
            li {
                button {
                    disabled: !view.has_previous,
                    onclick: move |_| {
                        let mut events = events;
                        controller.write().change_page(selected.saturating_sub(1), &mut events);
                    },
                    "‹"
                }
            }
            for (position, item) in view.items.iter().copied().enumerate() {
                {match item {
                    PageItem::Gap => rsx! {
                        li { key: "gap-{position}", class: "ellipsis", "..." }
                    },
                    PageItem::Page { number, ui_index, is_current } => rsx! {
                        li {
                            key: "page-{number}",
                            class: if is_current { "page-index current-page" } else { "page-index" },
                            button {
                                style: if is_current { "font-weight: 700;" } else { "" },
                                onclick: move |_| {
                                    let mut events = events;
                                    controller.write().change_page(ui_index, &mut events);
                                },
                                "{number}"
                            }
                        }
                    },
                }}
            }
            li {
                button {
                    disabled: !view.has_next,
                    onclick: move |_| {
                        let mut events = events;
                        controller.write().change_page(selected + 1, &mut events);
                    },
                    "›"
                }
            }
        }
    }
}
