/// Number of pages needed for `total` items. Zero items means zero pages.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// The 1-based `page` of `items`. Pages past the end, and page 0, are empty.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let Some(first) = page.checked_sub(1) else {
        return &[];
    };
    let start = first.saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

pub fn can_go_previous(current: usize) -> bool {
    current > 1
}

pub fn can_go_next(current: usize, pages: usize) -> bool {
    current < pages
}

/// Pulls `current` back into `1..=pages`. With no pages the first page is kept.
pub fn clamp_page(current: usize, pages: usize) -> usize {
    current.min(pages).max(1)
}

pub fn page_label(current: usize, pages: usize) -> String {
    format!("Página {current} de {pages}")
}
