use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// How the page index is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaginationPolicy {
    /// One entry per page.
    Full,
    /// First page, a window around the current page, last page, with
    /// ellipses for the gaps. Collections with at most `max_visible` pages
    /// are listed in full.
    Windowed { max_visible: usize },
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self::Windowed {
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

/// One clickable page number or a gap marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageIndexEntry {
    pub label: String,
    pub target_page: Option<usize>,
    pub is_ellipsis: bool,
    pub is_active: bool,
}

impl PageIndexEntry {
    fn page(page: usize, current: usize) -> Self {
        Self {
            label: page.to_string(),
            target_page: Some(page),
            is_ellipsis: false,
            is_active: page == current,
        }
    }

    fn ellipsis() -> Self {
        Self {
            label: "...".to_string(),
            target_page: None,
            is_ellipsis: true,
            is_active: false,
        }
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// The items on `page` (1-based). Pages past the end, and page 0, are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page index for a collection of `total_items`.
///
/// A collection that fits on one page gets no index at all.
pub fn build_page_index(
    total_items: usize,
    page_size: usize,
    current_page: usize,
    policy: PaginationPolicy,
) -> Vec<PageIndexEntry> {
    let total = total_pages(total_items, page_size);
    if total <= 1 {
        return Vec::new();
    }

    match policy {
        PaginationPolicy::Windowed { max_visible } if total > max_visible.max(1) => {
            windowed(total, current_page, max_visible.max(1))
        }
        _ => (1..=total).map(|p| PageIndexEntry::page(p, current_page)).collect(),
    }
}

fn windowed(total: usize, current_page: usize, max_visible: usize) -> Vec<PageIndexEntry> {
    let current = current_page.clamp(1, total);

    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    if end - start + 1 < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    let mut entries = Vec::with_capacity(max_visible + 4);
    entries.push(PageIndexEntry::page(1, current_page));
    if start > 2 {
        entries.push(PageIndexEntry::ellipsis());
    }
    entries.extend(
        (start..=end)
            .filter(|&p| p != 1 && p != total)
            .map(|p| PageIndexEntry::page(p, current_page)),
    );
    if end + 1 < total {
        entries.push(PageIndexEntry::ellipsis());
    }
    entries.push(PageIndexEntry::page(total, current_page));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(entries: &[PageIndexEntry]) -> Vec<String> {
        entries.iter().map(|e| e.label.clone()).collect()
    }

    #[test]
    fn test_paginate_slices_and_clamps() {
        let items: Vec<u32> = (1..=23).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 3, 10), &[21, 22, 23]);
        assert!(paginate(&items, 4, 10).is_empty());
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, usize::MAX, 10).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(11, 0), 0);
    }

    #[test]
    fn test_windowed_middle() {
        let entries = build_page_index(200, 10, 10, PaginationPolicy::default());
        assert_eq!(labels(&entries), vec!["1", "...", "8", "9", "10", "11", "12", "...", "20"]);
        assert!(entries[4].is_active);
        assert_eq!(entries[1].target_page, None);
        assert_eq!(entries[8].target_page, Some(20));
    }

    #[test]
    fn test_windowed_edges() {
        let policy = PaginationPolicy::default();
        assert_eq!(
            labels(&build_page_index(200, 10, 1, policy)),
            vec!["1", "2", "3", "4", "5", "...", "20"]
        );
        assert_eq!(
            labels(&build_page_index(200, 10, 20, policy)),
            vec!["1", "...", "16", "17", "18", "19", "20"]
        );
        assert_eq!(
            labels(&build_page_index(200, 10, 4, policy)),
            vec!["1", "2", "3", "4", "5", "6", "...", "20"]
        );
        assert_eq!(
            labels(&build_page_index(60, 10, 3, policy)),
            vec!["1", "2", "3", "4", "5", "6"]
        );
    }

    #[test]
    fn test_windowed_is_bounded() {
        let policy = PaginationPolicy::Windowed { max_visible: 5 };
        for current in 1..=1000 {
            let entries = build_page_index(10_000, 10, current, policy);
            assert!(entries.len() <= 9, "page {current}: {}", entries.len());
            assert_eq!(entries.iter().filter(|e| e.is_active).count(), 1);
        }
    }

    #[test]
    fn test_small_collections_list_every_page() {
        let entries = build_page_index(45, 10, 2, PaginationPolicy::default());
        assert_eq!(labels(&entries), vec!["1", "2", "3", "4", "5"]);
        assert!(entries.iter().all(|e| !e.is_ellipsis));

        assert!(build_page_index(10, 10, 1, PaginationPolicy::default()).is_empty());
        assert!(build_page_index(0, 10, 1, PaginationPolicy::Full).is_empty());
    }

    #[test]
    fn test_full_policy() {
        let entries = build_page_index(120, 10, 7, PaginationPolicy::Full);
        assert_eq!(entries.len(), 12);
        assert!(entries[6].is_active);
    }
}
