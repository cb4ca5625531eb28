//! Next/Previous enablement over a 1-based page counter.

/// Position within a paginated result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    total: u32,
}

impl Pager {
    /// `current` is clamped to at least 1. `total` is taken as reported,
    /// so an empty result set (0 pages) has neither Next nor Previous.
    pub fn new(current: u32, total: u32) -> Self {
        Self {
            current: current.max(1),
            total,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Page the Next action should request, if enabled.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    /// Page the Previous action should request, if enabled.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }
}
