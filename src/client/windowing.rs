//! Row windowing for the two infinite-scroll renderers.
//!
//! [`ManualWindow`] assumes every row is exactly [`ROW_HEIGHT_PX`] tall and
//! derives the visible slice straight from the scroll offset. [`Virtualizer`]
//! starts from the same estimate but keeps measured heights, so rows that wrap
//! to several lines still line up.

/// Fixed row height of the manual window, and the virtualizer's estimate.
pub const ROW_HEIGHT_PX: f64 = 100.0;
/// Row height used for page-size auto-fit, in rem.
pub const ROW_HEIGHT_REM: f64 = 6.25;
/// Viewport height the manual window renders for.
pub const VIEWPORT_PX: f64 = 500.0;
pub const MANUAL_OVERSCAN: usize = 2;
pub const VIRTUAL_OVERSCAN: usize = 3;
/// Distance from the bottom at which the manual window asks for more rows.
pub const FETCH_THRESHOLD_PX: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualWindow {
    pub start: usize,
    pub end: usize,
    pub padding_top: f64,
    pub padding_bottom: f64,
}

impl ManualWindow {
    pub fn compute(scroll_top: f64, count: usize, has_next_page: bool) -> Self {
        let scroll_top = scroll_top.max(0.0);
        let first = (scroll_top / ROW_HEIGHT_PX).floor() as usize;
        let last = ((scroll_top + VIEWPORT_PX) / ROW_HEIGHT_PX).ceil() as usize;

        let start = first.saturating_sub(MANUAL_OVERSCAN).min(count);
        let end = (last + MANUAL_OVERSCAN).min(count).max(start);
        let loader = if has_next_page { ROW_HEIGHT_PX } else { 0.0 };

        Self {
            start,
            end,
            padding_top: start as f64 * ROW_HEIGHT_PX,
            padding_bottom: (count - end) as f64 * ROW_HEIGHT_PX + loader,
        }
    }
}

/// True once the scroll position is within [`FETCH_THRESHOLD_PX`] of the end.
pub fn near_bottom(scroll_height: f64, scroll_top: f64, client_height: f64) -> bool {
    scroll_height - scroll_top - client_height < FETCH_THRESHOLD_PX
}

/// Page size that fills a container of `container_px` with rows of
/// [`ROW_HEIGHT_REM`], never below `min`.
pub fn auto_limit(container_px: f64, root_font_px: f64, min: u32) -> u32 {
    let row_px = ROW_HEIGHT_REM * root_font_px;
    if row_px <= 0.0 || !container_px.is_finite() {
        return min;
    }
    ((container_px / row_px).floor().max(0.0) as u32).max(min)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl VirtualItem {
    pub fn size(&self) -> f64 {
        self.end - self.start
    }
}

/// Variable-height list virtualizer with measured row sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Virtualizer {
    estimate: f64,
    overscan: usize,
    sizes: Vec<Option<f64>>,
}

impl Virtualizer {
    pub fn new(count: usize, estimate: f64, overscan: usize) -> Self {
        Self {
            estimate,
            overscan,
            sizes: vec![None; count],
        }
    }

    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Grows or shrinks the list, keeping measurements of surviving rows.
    pub fn set_count(&mut self, count: usize) {
        self.sizes.resize(count, None);
    }

    pub fn size_of(&self, index: usize) -> f64 {
        self.sizes
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.estimate)
    }

    /// Records a measured height. Returns false when nothing changed.
    pub fn measure(&mut self, index: usize, size: f64) -> bool {
        match self.sizes.get_mut(index) {
            Some(slot) if *slot != Some(size) && size > 0.0 => {
                *slot = Some(size);
                true
            }
            _ => false,
        }
    }

    /// Start offsets of every row plus the total height as the last element.
    fn offsets(&self) -> Vec<f64> {
        let mut offsets = Vec::with_capacity(self.count() + 1);
        let mut acc = 0.0;
        offsets.push(acc);
        for index in 0..self.count() {
            acc += self.size_of(index);
            offsets.push(acc);
        }
        offsets
    }

    pub fn total_size(&self) -> f64 {
        (0..self.count()).map(|index| self.size_of(index)).sum()
    }

    /// Rows intersecting `[scroll_top, scroll_top + viewport)`, widened by
    /// the overscan on both sides.
    pub fn virtual_items(&self, scroll_top: f64, viewport: f64) -> Vec<VirtualItem> {
        let count = self.count();
        if count == 0 {
            return Vec::new();
        }
        let offsets = self.offsets();
        let top = scroll_top.max(0.0);
        let bottom = top + viewport.max(0.0);

        // First row whose end lies below the top edge.
        let first = offsets[1..].partition_point(|&end| end <= top).min(count - 1);
        // One past the last row whose start lies above the bottom edge.
        let last = offsets[..count].partition_point(|&start| start < bottom).max(first + 1);

        let start = first.saturating_sub(self.overscan);
        let end = (last + self.overscan).min(count);
        (start..end)
            .map(|index| VirtualItem {
                index,
                start: offsets[index],
                end: offsets[index + 1],
            })
            .collect()
    }

    /// Padding above and below the rendered items.
    pub fn spacers(&self, items: &[VirtualItem]) -> (f64, f64) {
        match (items.first(), items.last()) {
            (Some(first), Some(last)) => (first.start, self.total_size() - last.end),
            _ => (0.0, 0.0),
        }
    }
}

/// The virtualized renderer asks for more once the last rendered item is the
/// last loaded row.
pub fn reached_end(items: &[VirtualItem], count: usize) -> bool {
    items.last().is_some_and(|last| last.index + 1 >= count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_window_at_top() {
        let window = ManualWindow::compute(0.0, 100, true);
        assert_eq!(window.start, 0);
        assert_eq!(window.end, 7); // ceil(500/100) + 2
        assert_eq!(window.padding_top, 0.0);
        assert_eq!(window.padding_bottom, 93.0 * 100.0 + 100.0);
    }

    #[test]
    fn test_manual_window_scrolled() {
        let window = ManualWindow::compute(1050.0, 100, false);
        assert_eq!(window.start, 8); // floor(10.5) - 2
        assert_eq!(window.end, 18); // ceil(15.5) + 2
        assert_eq!(window.padding_top, 800.0);
        assert_eq!(window.padding_bottom, 82.0 * 100.0);
    }

    #[test]
    fn test_manual_window_short_list() {
        let window = ManualWindow::compute(0.0, 3, false);
        assert_eq!((window.start, window.end), (0, 3));
        assert_eq!(window.padding_bottom, 0.0);

        let empty = ManualWindow::compute(400.0, 0, false);
        assert_eq!((empty.start, empty.end), (0, 0));
    }

    #[test]
    fn test_near_bottom() {
        assert!(near_bottom(1000.0, 400.0, 500.0));
        assert!(!near_bottom(1000.0, 200.0, 500.0));
    }

    #[test]
    fn test_auto_limit() {
        assert_eq!(auto_limit(800.0, 16.0, 3), 8);
        assert_eq!(auto_limit(120.0, 16.0, 3), 3);
        assert_eq!(auto_limit(f64::NAN, 16.0, 3), 3);
    }

    #[test]
    fn test_virtualizer_uniform_rows() {
        let virtualizer = Virtualizer::new(50, ROW_HEIGHT_PX, VIRTUAL_OVERSCAN);
        let items = virtualizer.virtual_items(1000.0, 500.0);
        // rows 10..15 visible, plus 3 on each side
        assert_eq!(items.first().unwrap().index, 7);
        assert_eq!(items.last().unwrap().index, 17);
        assert_eq!(items[0].start, 700.0);
        assert_eq!(virtualizer.total_size(), 5000.0);

        let (top, bottom) = virtualizer.spacers(&items);
        assert_eq!(top, 700.0);
        assert_eq!(bottom, 5000.0 - 1800.0);
    }

    #[test]
    fn test_virtualizer_measurements_shift_offsets() {
        let mut virtualizer = Virtualizer::new(10, 100.0, 0);
        assert!(virtualizer.measure(0, 250.0));
        assert!(!virtualizer.measure(0, 250.0), "same size is not a change");
        assert!(!virtualizer.measure(42, 10.0), "out of range");

        assert_eq!(virtualizer.total_size(), 1150.0);
        let items = virtualizer.virtual_items(260.0, 80.0);
        assert_eq!(items.iter().map(|i| i.index).collect::<Vec<_>>(), vec![1]);
        assert_eq!(items[0].start, 250.0);
        assert_eq!(items[0].size(), 100.0);
    }

    #[test]
    fn test_virtualizer_count_changes_keep_measurements() {
        let mut virtualizer = Virtualizer::new(2, 100.0, 3);
        virtualizer.measure(1, 40.0);
        virtualizer.set_count(5);
        assert_eq!(virtualizer.size_of(1), 40.0);
        assert_eq!(virtualizer.size_of(4), 100.0);

        let items = virtualizer.virtual_items(0.0, 10_000.0);
        assert_eq!(items.len(), 5);
        assert!(reached_end(&items, virtualizer.count()));
    }

    #[test]
    fn test_virtualizer_empty_and_end_detection() {
        let virtualizer = Virtualizer::new(0, 100.0, 3);
        assert!(virtualizer.virtual_items(0.0, 500.0).is_empty());
        assert!(!reached_end(&[], 0));

        let virtualizer = Virtualizer::new(100, 100.0, 3);
        let items = virtualizer.virtual_items(0.0, 500.0);
        assert!(!reached_end(&items, 100));
    }
}
