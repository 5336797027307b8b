//! Background preload ordering
//!
//! Pages are warmed off-screen in priority order: the first two pages, then
//! the neighbours of the visible page, then everything else ascending.

use std::collections::BTreeSet;

/// Default ceiling on preload renders per batch
pub const DEFAULT_PRELOAD_CAP: usize = 10;

/// Minimum width of a preload render, in shell units
pub const MIN_PRELOAD_WIDTH: f32 = 10.0;

/// Fraction of the visible page width used for preload renders
pub const PRELOAD_WIDTH_FRACTION: f32 = 0.1;

/// Pages to render next, highest priority first.
///
/// `current_page` is the underlying page on screen, if any. The result never
/// contains the current page, a loaded page, or a duplicate, and holds at
/// most `cap` entries.
pub fn next_batch(
    current_page: Option<u32>,
    loaded: &BTreeSet<u32>,
    page_count: u32,
    cap: usize,
) -> Vec<u32> {
    let neighbours = current_page
        .into_iter()
        .flat_map(|page| [page.checked_sub(1), page.checked_add(1)])
        .flatten();

    batch_with_neighbours(current_page, neighbours, loaded, page_count, cap)
}

/// [`next_batch`] with explicit neighbours.
///
/// Used while an insertion is on screen: there is no current page, but the
/// pages on either side of the insertion are the next ones the visitor sees.
pub fn batch_with_neighbours(
    current_page: Option<u32>,
    neighbours: impl IntoIterator<Item = u32>,
    loaded: &BTreeSet<u32>,
    page_count: u32,
    cap: usize,
) -> Vec<u32> {
    let candidates = [1, 2].into_iter().chain(neighbours).chain(1..=page_count);

    let mut batch = Vec::with_capacity(cap.min(page_count as usize));
    for page in candidates {
        if batch.len() >= cap {
            break;
        }
        if page == 0
            || page > page_count
            || Some(page) == current_page
            || loaded.contains(&page)
            || batch.contains(&page)
        {
            continue;
        }
        batch.push(page);
    }
    batch
}

/// Width of a minimal-footprint preload render
pub fn preload_width(page_width: f32) -> f32 {
    (page_width * PRELOAD_WIDTH_FRACTION).max(MIN_PRELOAD_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(pages: &[u32]) -> BTreeSet<u32> {
        pages.iter().copied().collect()
    }

    #[test]
    fn test_first_pages_then_neighbours_then_ascending() {
        let batch = next_batch(Some(6), &set(&[]), 12, 10);
        assert_eq!(batch, vec![1, 2, 5, 7, 3, 4, 8, 9, 10, 11]);
    }

    #[test]
    fn test_explicit_neighbours_come_before_tail() {
        let batch = batch_with_neighbours(None, [5, 6], &set(&[]), 12, 6);
        assert_eq!(batch, vec![1, 2, 5, 6, 3, 4]);
    }

    #[test]
    fn test_skips_loaded_and_current() {
        let batch = next_batch(Some(2), &set(&[1, 3]), 5, 10);
        assert_eq!(batch, vec![4, 5]);
    }

    #[test]
    fn test_respects_cap() {
        assert_eq!(next_batch(Some(1), &set(&[]), 40, 3), vec![2, 3, 4]);
        assert!(next_batch(Some(1), &set(&[]), 40, 0).is_empty());
    }

    #[test]
    fn test_neighbours_clamped_to_document() {
        let batch = next_batch(Some(3), &set(&[1, 2]), 3, 10);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_no_current_page() {
        assert_eq!(next_batch(None, &set(&[]), 3, 10), vec![1, 2, 3]);
    }

    #[test]
    fn test_preload_width_floor() {
        assert_eq!(preload_width(50.0), MIN_PRELOAD_WIDTH);
        assert_eq!(preload_width(800.0), 80.0);
    }

    proptest! {
        #[test]
        fn prop_batch_invariants(
            page_count in 0u32..60,
            current in proptest::option::of(1u32..60),
            loaded in proptest::collection::btree_set(1u32..60, 0..30),
            cap in 0usize..15,
        ) {
            let batch = next_batch(current, &loaded, page_count, cap);

            prop_assert!(batch.len() <= cap);
            prop_assert!(current.map_or(true, |c| !batch.contains(&c)));

            let unique: BTreeSet<u32> = batch.iter().copied().collect();
            prop_assert_eq!(unique.len(), batch.len());

            for page in &batch {
                prop_assert!(*page >= 1 && *page <= page_count);
                prop_assert!(!loaded.contains(page));
            }

            for first in [1u32, 2] {
                let eligible = first <= page_count && !loaded.contains(&first) && current != Some(first);
                if eligible && cap >= 2 {
                    let idx = batch.iter().position(|p| *p == first);
                    prop_assert!(idx.is_some());
                    prop_assert!(idx.unwrap() < 2);
                }
            }
        }
    }
}
