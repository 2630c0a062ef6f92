//! Surfaces and the shared color broadcast
//!
//! Every drawable in the page is shaded by a [`Surface`]. All surfaces share
//! one base color; [`ColorBroadcast`] owns them and pushes a new color to each
//! subscriber when the user picks one.

use slotmap::{new_key_type, SlotMap};

use crate::Color;

new_key_type! {
    /// Key to a surface registered with a [`ColorBroadcast`]
    pub struct SurfaceKey;
}

/// Identifies a toon gradient texture owned by the renderer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GradientId(pub u32);

/// How a surface is shaded
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceKind {
    /// Banded diffuse lighting looked up from a gradient texture
    Toon { gradient: GradientId },
    /// Unlit square points
    Points {
        /// Point size in world units
        size: f32,
        /// Shrink points with distance from the camera
        size_attenuation: bool,
    },
}

/// A shading description with its current base color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub color: Color,
}

/// Shared color applied to every subscribed surface
pub struct ColorBroadcast {
    color: Color,
    surfaces: SlotMap<SurfaceKey, Surface>,
    order: Vec<SurfaceKey>,
}

impl Default for ColorBroadcast {
    fn default() -> Self {
        Self::new(Color::default())
    }
}

impl ColorBroadcast {
    /// Create an empty broadcast with the given initial color
    pub fn new(color: Color) -> Self {
        Self {
            color,
            surfaces: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register a surface; it starts with the current color
    pub fn subscribe(&mut self, kind: SurfaceKind) -> SurfaceKey {
        let key = self.surfaces.insert(Surface { kind, color: self.color });
        self.order.push(key);
        key
    }

    /// Push a new color to every subscriber. Returns how many were updated.
    pub fn set_color(&mut self, color: Color) -> usize {
        self.color = color;
        for surface in self.surfaces.values_mut() {
            surface.color = color;
        }
        log::debug!("Color {} applied to {} surfaces", color, self.surfaces.len());
        self.surfaces.len()
    }

    /// The current shared color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Get a surface by key
    pub fn get(&self, key: SurfaceKey) -> Option<&Surface> {
        self.surfaces.get(key)
    }

    /// Surfaces in subscription order
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceKey, &Surface)> + '_ {
        self.order
            .iter()
            .filter_map(move |&key| self.surfaces.get(key).map(|s| (key, s)))
    }

    /// Number of subscribed surfaces
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// True if nothing has subscribed yet
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
