/// Number of pages needed for `total` items; zero items means zero pages.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Pages are 1-based and never drop below 1, even when the list is empty.
pub fn clamp_page(current: usize, total_pages: usize) -> usize {
    current.min(total_pages.max(1)).max(1)
}

pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}
