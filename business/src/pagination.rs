//! Page arithmetic and the state of the pagination bar.

use std::ops::{Range, RangeInclusive};

/// `ceil(count / page_size)`, 0 when there is nothing to show.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Bounds of page `page` (1-based) inside a list of `len` items.
///
/// Pages past the end give an empty range.
pub fn page_range(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// A move requested from the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
    /// Direct jump, clamped into `[1, total]`.
    Jump(usize),
}

impl PageNav {
    /// Page reached from `current` when there are `total` pages.
    ///
    /// With no pages at all every move lands on page 1.
    pub fn apply(self, current: usize, total: usize) -> usize {
        if total == 0 {
            return 1;
        }
        match self {
            Self::First => 1,
            Self::Previous => current.saturating_sub(1).max(1),
            Self::Next => current.saturating_add(1).min(total),
            Self::Last => total,
            Self::Jump(page) => page.clamp(1, total),
        }
    }
}

/// Which pagination buttons are enabled, and the indicator text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub current: usize,
    pub total: usize,
}

impl Default for PageControls {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl PageControls {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    /// First and previous.
    pub fn can_go_back(&self) -> bool {
        self.current > 1
    }

    /// Next and last. Still enabled on a page past the end, so the bar can
    /// get back after the list shrinks.
    pub fn can_go_forward(&self) -> bool {
        self.total > 0 && self.current != self.total
    }

    /// Numbered buttons, `1..=total`.
    pub fn pages(&self) -> RangeInclusive<usize> {
        1..=self.total
    }

    pub fn is_current(&self, page: usize) -> bool {
        page == self.current
    }

    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }
}
