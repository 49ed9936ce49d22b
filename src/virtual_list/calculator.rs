//! Virtual List Calculator
//!
//! Maps a scroll position to the contiguous index range that must be rendered.

use std::ops::Range;

use serde::Serialize;

use crate::error::{Result, ServiceError};

/// Rows rendered beyond each edge of the viewport unless configured otherwise
pub const DEFAULT_OVERSCAN: u32 = 5;

// == Visible Range ==
/// Rows to render for one scroll position.
///
/// `end` is the last rendered index (inclusive) and is only meaningful when
/// `count > 0`. Use [`VisibleRange::indices`] to iterate safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleRange {
    /// First rendered index
    pub start: usize,
    /// Last rendered index (inclusive)
    pub end: usize,
    /// Top padding so rendered rows line up with their scroll position
    pub offset_pixels: u64,
    /// Number of rendered rows
    pub count: usize,
}

impl VisibleRange {
    /// Nothing to render.
    pub const fn empty() -> Self {
        Self {
            start: 0,
            end: 0,
            offset_pixels: 0,
            count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Half-open index range of the rendered rows.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.count
    }

    /// The rendered rows of `items`, clamped to the slice length.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = (self.start + self.count).min(items.len());
        &items[start..end]
    }
}

// == Calculator ==
/// Window calculator for a list of uniform row height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualListCalculator {
    item_height: u32,
    viewport_height: u32,
    overscan: u32,
}

impl VirtualListCalculator {
    /// Creates a calculator. `item_height` must be non-zero.
    pub fn new(item_height: u32, viewport_height: u32, overscan: u32) -> Result<Self> {
        if item_height == 0 {
            return Err(ServiceError::InvalidRequest(
                "item_height must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            item_height,
            viewport_height,
            overscan,
        })
    }

    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn overscan(&self) -> u32 {
        self.overscan
    }

    // == Visible Range ==
    /// Computes the rows to render at `scroll_offset` for a list of
    /// `total_items` rows.
    ///
    /// An empty list yields [`VisibleRange::empty`]. When the offset lies
    /// beyond the last row (so the overscanned start would pass the end),
    /// the window collapses onto the last row.
    pub fn calculate_visible_range(&self, scroll_offset: u64, total_items: usize) -> VisibleRange {
        if total_items == 0 {
            return VisibleRange::empty();
        }

        let item_height = u64::from(self.item_height);
        let overscan = self.overscan as usize;
        let last_index = total_items - 1;

        let raw_start = to_index(scroll_offset / item_height);
        let raw_end =
            to_index(scroll_offset.saturating_add(u64::from(self.viewport_height)) / item_height);

        let end = raw_end.saturating_add(overscan).min(last_index);
        let mut start = raw_start.saturating_sub(overscan);
        if start > end {
            start = end;
        }

        VisibleRange {
            start,
            end,
            offset_pixels: self.calculate_scroll_position(start),
            count: end - start + 1,
        }
    }

    // == Total Height ==
    /// Full scrollable height of `total_items` rows, saturating at `u64::MAX`.
    pub fn calculate_total_height(&self, total_items: usize) -> u64 {
        (total_items as u64).saturating_mul(u64::from(self.item_height))
    }

    // == Scroll Position ==
    /// Scroll offset that puts row `index` at the top of the viewport.
    pub fn calculate_scroll_position(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(u64::from(self.item_height))
    }
}

/// Row index for a row count that may not fit in `usize`.
fn to_index(rows: u64) -> usize {
    usize::try_from(rows).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn calculator() -> VirtualListCalculator {
        VirtualListCalculator::new(60, 400, 5).unwrap()
    }

    #[test]
    fn test_mid_list_window() {
        let range = calculator().calculate_visible_range(1200, 1000);

        assert_eq!(range.start, 15);
        assert_eq!(range.end, 31);
        assert_eq!(range.offset_pixels, 900);
        assert_eq!(range.count, 17);
        assert_eq!(range.indices(), 15..32);
    }

    #[test]
    fn test_top_of_list_never_negative() {
        let range = calculator().calculate_visible_range(0, 1000);

        assert_eq!(range.start, 0);
        assert_eq!(range.offset_pixels, 0);
        // rows 0..=6 visible plus 5 overscan below
        assert_eq!(range.end, 11);
    }

    #[test]
    fn test_end_of_list_is_clamped() {
        let calc = calculator();
        let total = 1000;
        let bottom = calc.calculate_total_height(total) - 400;

        let range = calc.calculate_visible_range(bottom, total);
        assert_eq!(range.end, total - 1);
        assert_eq!(range.start + range.count, total);
    }

    #[test]
    fn test_offset_near_end_follows_formula() {
        // raw 996..=1003, start 991, end clamped to 999
        let range = calculator().calculate_visible_range(59_800, 1000);

        assert_eq!(range.start, 991);
        assert_eq!(range.end, 999);
        assert_eq!(range.count, 9);
        assert_eq!(range.offset_pixels, 59_460);
    }

    #[test]
    fn test_offset_past_last_row_collapses_to_tail() {
        let range = calculator().calculate_visible_range(1_000_000, 10);

        assert!(!range.is_empty());
        assert_eq!(range.start, 9);
        assert_eq!(range.end, 9);
        assert_eq!(range.count, 1);
        assert_eq!(range.offset_pixels, 540);
    }

    #[test]
    fn test_huge_inputs_do_not_overflow() {
        let calc = calculator();

        let range = calc.calculate_visible_range(u64::MAX, usize::MAX);
        assert!(range.start <= range.end);
        assert!(range.end < usize::MAX);
        assert_eq!(range.count, 11);

        let range = calc.calculate_visible_range(0, usize::MAX / 2);
        assert_eq!(range.start, 0);
        assert_eq!(range.end, 11);

        assert_eq!(calc.calculate_total_height(usize::MAX), u64::MAX);
        assert_eq!(calc.calculate_scroll_position(usize::MAX), u64::MAX);
    }

    #[test]
    fn test_short_list_renders_everything() {
        let range = calculator().calculate_visible_range(0, 3);

        assert_eq!(range.indices(), 0..3);
        assert_eq!(range.count, 3);
    }

    #[test]
    fn test_empty_list_requests_no_rendering() {
        let range = calculator().calculate_visible_range(500, 0);

        assert!(range.is_empty());
        assert_eq!(range.count, 0);
        assert!(range.indices().is_empty());
        let items: [u8; 0] = [];
        assert!(range.slice(&items).is_empty());
    }

    #[test]
    fn test_slice_returns_rendered_rows() {
        let rows: Vec<usize> = (0..1000).collect();
        let range = calculator().calculate_visible_range(1200, rows.len());

        let rendered = range.slice(&rows);
        assert_eq!(rendered.len(), 17);
        assert_eq!(rendered.first(), Some(&15));
        assert_eq!(rendered.last(), Some(&31));
    }

    #[test]
    fn test_total_height_and_scroll_position() {
        let calc = calculator();
        assert_eq!(calc.calculate_total_height(1000), 60_000);
        assert_eq!(calc.calculate_total_height(0), 0);
        assert_eq!(calc.calculate_scroll_position(20), 1200);
    }

    #[test]
    fn test_zero_item_height_rejected() {
        let result = VirtualListCalculator::new(0, 400, 5);
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let calc = calculator();
        assert_eq!(
            calc.calculate_visible_range(777, 500),
            calc.calculate_visible_range(777, 500)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // The window always lies inside the list and covers the viewport.
        #[test]
        fn prop_window_within_bounds(
            item_height in 1u32..200,
            viewport_height in 0u32..2_000,
            overscan in 0u32..20,
            total in 1usize..10_000,
            scroll_offset in 0u64..2_000_000
        ) {
            let calc = VirtualListCalculator::new(item_height, viewport_height, overscan).unwrap();
            let range = calc.calculate_visible_range(scroll_offset, total);

            prop_assert!(range.count >= 1);
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end < total);
            prop_assert_eq!(range.count, range.end - range.start + 1);
            prop_assert_eq!(range.offset_pixels, calc.calculate_scroll_position(range.start));
        }

        // Offsets within the content match the plain formula exactly.
        #[test]
        fn prop_window_matches_formula(
            item_height in 1u32..200,
            viewport_height in 0u32..2_000,
            overscan in 0u32..20,
            total in 1usize..10_000,
            row_fraction in 0.0f64..1.0
        ) {
            let calc = VirtualListCalculator::new(item_height, viewport_height, overscan).unwrap();
            let max_offset = (total as u64 - 1) * u64::from(item_height);
            let scroll_offset = (max_offset as f64 * row_fraction) as u64;

            let (start, end) = reference_window(item_height, viewport_height, overscan, total, scroll_offset);
            let range = calc.calculate_visible_range(scroll_offset, total);

            prop_assert_eq!(range.start as i64, start);
            prop_assert_eq!(range.end as i64, end);
            prop_assert_eq!(range.count as i64, end - start + 1);
            prop_assert_eq!(range.offset_pixels as i64, start * i64::from(item_height));
        }
    }

    /// Signed arithmetic, step by step, without any clamping beyond min/max.
    fn reference_window(
        item_height: u32,
        viewport_height: u32,
        overscan: u32,
        total: usize,
        scroll_offset: u64,
    ) -> (i64, i64) {
        let height = i64::from(item_height);
        let offset = scroll_offset as i64;
        let raw_start = offset / height;
        let raw_end = (offset + i64::from(viewport_height)) / height;
        let start = (raw_start - i64::from(overscan)).max(0);
        let end = (total as i64 - 1).min(raw_end + i64::from(overscan));
        (start, end)
    }
}
