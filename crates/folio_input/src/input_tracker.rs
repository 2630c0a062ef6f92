//! Cursor and page-scroll tracking
//!
//! The page is `section_count` viewports tall. Wheel input moves a virtual
//! scroll offset (logical pixels) over that page; the tracker reports when the
//! nearest section changes.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::MouseScrollDelta;

/// The nearest section changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionCrossing {
    pub from: usize,
    pub to: usize,
}

/// Latest cursor position and scroll offset, overwritten in place
pub struct InputTracker {
    // Viewport in logical pixels
    width: f32,
    height: f32,
    scale_factor: f64,

    // Cursor relative to the viewport center, roughly [-0.5, 0.5]
    cursor_x: f32,
    cursor_y: f32,

    scroll_offset: f32,
    section: usize,
    section_count: usize,

    /// Logical pixels scrolled per wheel line
    pub line_height: f32,
}

impl InputTracker {
    /// Create a tracker for a window of `size` physical pixels
    pub fn new(size: PhysicalSize<u32>, scale_factor: f64, section_count: usize) -> Self {
        let mut tracker = Self {
            width: 0.0,
            height: 0.0,
            scale_factor: 1.0,
            cursor_x: 0.0,
            cursor_y: 0.0,
            scroll_offset: 0.0,
            section: 0,
            section_count,
            line_height: 40.0,
        };
        tracker.set_viewport(size, scale_factor);
        tracker
    }

    /// Builder: set the logical pixels scrolled per wheel line
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Process a cursor move in physical pixels
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let logical = position.to_logical::<f64>(self.scale_factor);
        if self.width > 0.0 {
            self.cursor_x = logical.x as f32 / self.width - 0.5;
        }
        if self.height > 0.0 {
            self.cursor_y = logical.y as f32 / self.height - 0.5;
        }
    }

    /// Process a wheel event. Wheel down scrolls down the page.
    pub fn process_mouse_wheel(&mut self, delta: MouseScrollDelta) -> Option<SectionCrossing> {
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, lines) => lines * self.line_height,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / self.scale_factor) as f32,
        };
        self.scroll_to(self.scroll_offset - dy)
    }

    /// Set the scroll offset directly (clamped to the page)
    pub fn scroll_to(&mut self, offset: f32) -> Option<SectionCrossing> {
        // Minimized: keep the offset and section until the window comes back
        if self.height <= 0.0 {
            return None;
        }
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
        self.update_section()
    }

    /// Track a window resize or scale factor change
    pub fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) -> Option<SectionCrossing> {
        self.set_viewport(size, scale_factor);
        self.scroll_to(self.scroll_offset)
    }

    fn set_viewport(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        self.scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let logical = size.to_logical::<f64>(self.scale_factor);
        self.width = logical.width as f32;
        self.height = logical.height as f32;
    }

    fn update_section(&mut self) -> Option<SectionCrossing> {
        let section = (self.scroll_offset / self.height).round() as usize;
        if section == self.section {
            return None;
        }
        let crossing = SectionCrossing { from: self.section, to: section };
        self.section = section;
        log::debug!("Section {} -> {}", crossing.from, crossing.to);
        Some(crossing)
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.section_count.saturating_sub(1) as f32 * self.height).max(0.0)
    }

    /// Normalized cursor `(x, y)`
    pub fn cursor(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Current scroll offset in logical pixels
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Scroll offset in viewport heights (0.0 at the top)
    pub fn scroll_fraction(&self) -> f32 {
        if self.height > 0.0 {
            self.scroll_offset / self.height
        } else {
            0.0
        }
    }

    /// Index of the nearest section
    pub fn section(&self) -> usize {
        self.section
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }
}
