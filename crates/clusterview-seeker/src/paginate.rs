//! One-based pagination.

/// Returns page `page` (1-based) of `items`, `per_page` items at a time.
///
/// Pages past the end, page `0` and a `per_page` of `0` all yield an empty
/// slice.
///
/// ```
/// use clusterview_seeker::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// assert_eq!(paginate(&items, 1, 10), &items[0..10]);
/// assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
/// assert!(paginate(&items, 4, 10).is_empty());
/// ```
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(per_page) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items. Zero items still make one page.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}
