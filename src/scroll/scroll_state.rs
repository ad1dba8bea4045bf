/// Vertical scroll position over the displayed text
///
/// Content may be scrolled until only half a screen of it remains visible, so the
/// maximum offset is `content_lines - viewport_height / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub offset: usize,
    pub max_offset: usize,
    pub viewport_height: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the maximum offset and clamp the current one into range
    pub fn update_bounds(&mut self, content_lines: usize, viewport_height: usize) {
        self.viewport_height = viewport_height;
        self.max_offset = content_lines.saturating_sub(self.half_page());
        self.offset = self.offset.min(self.max_offset);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.half_page());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.half_page());
    }

    pub fn half_page(&self) -> usize {
        self.viewport_height / 2
    }
}

#[cfg(test)]
#[path = "scroll_state_tests.rs"]
mod scroll_state_tests;
