//! Keyboard color panel
//!
//! Cycles the shared material color through a fixed palette.

use folio_core::{Color, ColorBroadcast};

/// Palette cursor driving the color broadcast
pub struct ColorPanel {
    palette: Vec<Color>,
    current: usize,
}

impl ColorPanel {
    /// Create a panel over `palette`; the first entry is the starting color.
    /// An empty palette falls back to white.
    pub fn new(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            vec![Color::WHITE]
        } else {
            palette
        };
        Self { palette, current: 0 }
    }

    /// Color currently selected
    pub fn current(&self) -> Color {
        self.palette[self.current]
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    /// Select the next palette entry (wrapping) and broadcast it
    pub fn cycle(&mut self, colors: &mut ColorBroadcast) -> Color {
        self.current = (self.current + 1) % self.palette.len();
        let color = self.current();
        let updated = colors.set_color(color);
        log::info!("Material color {} ({} surfaces)", color, updated);
        color
    }
}
