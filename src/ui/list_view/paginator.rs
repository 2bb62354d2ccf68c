use std::collections::BTreeSet;

/// Pages shown around the current one.
pub const PAGE_RANGE_DISPLAYED: usize = 3;
/// Pages pinned at each end of the paginator.
pub const MARGIN_PAGES_DISPLAYED: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page {
        /// 1-based page number shown to the user.
        number: usize,
        /// 0-based index reported back by the paginator control.
        ui_index: usize,
        is_current: bool,
    },
    Gap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorView {
    pub items: Vec<PageItem>,
    pub has_previous: bool,
    pub has_next: bool,
    /// 0-based index of the current page.
    pub selected: usize,
}

/// Lays out the page links for `page_count` pages with `current_page`
/// (1-based) selected: `margin` pages pinned at each end, a window of
/// `range` pages slid to stay inside the bounds, and a gap wherever pages
/// are skipped.
pub fn paginate(
    page_count: usize,
    current_page: usize,
    range: usize,
    margin: usize,
) -> PaginatorView {
    if page_count == 0 {
        return PaginatorView {
            items: Vec::new(),
            has_previous: false,
            has_next: false,
            selected: 0,
        };
    }

    let current = current_page.clamp(1, page_count);
    let window = range.clamp(1, page_count);
    let latest_start = page_count - window + 1;
    let start = current.saturating_sub(window / 2).clamp(1, latest_start);
    let end = start + window - 1;

    let mut visible: BTreeSet<usize> = (start..=end).collect();
    visible.extend(1..=margin.min(page_count));
    visible.extend(page_count.saturating_sub(margin) + 1..=page_count);

    let mut items = Vec::with_capacity(visible.len() + 2);
    let mut previous = None;
    for number in visible {
        if let Some(previous) = previous {
            if number > previous + 1 {
                items.push(PageItem::Gap);
            }
        }
        items.push(PageItem::Page {
            number,
            ui_index: number - 1,
            is_current: number == current,
        });
        previous = Some(number);
    }

    PaginatorView {
        items,
        has_previous: current > 1,
        has_next: current < page_count,
        selected: current - 1,
    }
}

/// Paginator with the list header's fixed range and margins.
pub fn paginate_default(page_count: usize, current_page: usize) -> PaginatorView {
    paginate(
        page_count,
        current_page,
        PAGE_RANGE_DISPLAYED,
        MARGIN_PAGES_DISPLAYED,
    )
}
