//! ページ分割
//!
//! ページ番号は1始まり。総ページ数は最低1。

use std::ops::Range;

/// 選択可能なページサイズ
pub const PAGE_SIZES: [usize; 3] = [25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 50;

pub fn is_allowed_page_size(size: usize) -> bool {
    PAGE_SIZES.contains(&size)
}

/// 総ページ数 = max(1, ceil(count / page_size))
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// 現在ページを [1, total_pages] に収める
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages).max(1)
}

/// 指定ページに表示する範囲（絞り込み後リスト上の位置）
pub fn page_range(count: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let page = clamp_page(page, total_pages(count, page_size));
    let start = ((page - 1) * page_size).min(count);
    let end = (start + page_size).min(count);
    start..end
}

/// ページャーの1要素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// ページャーに並べる要素
///
/// 先頭ページ、末尾ページ、現在ページの前後1ページを表示し、
/// 間が空く場合は省略記号を1つ挟む。
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageItem> {
    let total = total_pages.max(1);
    let current = clamp_page(current, total);
    let page = |number: usize| PageItem::Page { number, current: number == current };

    let mut items = vec![page(1)];
    if total == 1 {
        return items;
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);

    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    for number in start..=end {
        items.push(page(number));
    }
    if end < total - 1 {
        items.push(PageItem::Ellipsis);
    }

    items.push(page(total));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<Option<usize>> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 25), 1);
        assert_eq!(total_pages(25, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(50, 25), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
    }

    #[test]
    fn test_page_range_scenario() {
        assert_eq!(page_range(50, 1, 25), 0..25);
        assert_eq!(page_range(50, 2, 25), 25..50);
        assert_eq!(page_range(50, 7, 25), 25..50);
        assert_eq!(page_range(0, 1, 25), 0..0);
        assert_eq!(page_range(30, 2, 25), 25..30);
    }

    #[test]
    fn test_window_single_page() {
        assert_eq!(page_window(1, 1), vec![PageItem::Page { number: 1, current: true }]);
    }

    #[test]
    fn test_window_small_has_no_ellipsis() {
        assert_eq!(numbers(&page_window(1, 2)), vec![Some(1), Some(2)]);
        assert_eq!(numbers(&page_window(2, 3)), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_window_start() {
        assert_eq!(numbers(&page_window(1, 10)), vec![Some(1), Some(2), None, Some(10)]);
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(
            numbers(&page_window(5, 10)),
            vec![Some(1), None, Some(4), Some(5), Some(6), None, Some(10)]
        );
    }

    #[test]
    fn test_window_end() {
        assert_eq!(numbers(&page_window(10, 10)), vec![Some(1), None, Some(9), Some(10)]);
    }

    #[test]
    fn test_window_marks_current() {
        let items = page_window(3, 5);
        let current: Vec<_> = items
            .iter()
            .filter(|item| matches!(item, PageItem::Page { current: true, .. }))
            .collect();
        assert_eq!(current, vec![&PageItem::Page { number: 3, current: true }]);
    }
}
