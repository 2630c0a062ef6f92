//! Background particle field
//!
//! A fixed cloud of points scattered across the whole height of the page,
//! so some are always visible whichever section the camera is on.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{ColorBroadcast, SurfaceKey, SurfaceKind};

/// Particle field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Number of points
    pub count: usize,
    /// Width and depth of the cloud
    pub spread: f32,
    /// Point size in world units
    pub size: f32,
    /// Shrink points with distance from the camera
    pub size_attenuation: bool,
    /// Fixed seed for a reproducible layout; random when unset
    pub seed: Option<u64>,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 200,
            spread: 10.0,
            size: 0.03,
            size_attenuation: true,
            seed: None,
        }
    }
}

/// Generated point cloud and the surface it is drawn with
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
    surface: SurfaceKey,
}

impl ParticleField {
    /// Scatter particles over `section_count` sections spaced `spacing` apart
    /// and register their surface with `colors`
    pub fn generate(
        settings: &ParticleSettings,
        spacing: f32,
        section_count: usize,
        colors: &mut ColorBroadcast,
    ) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let height = spacing * section_count as f32;

        let positions = (0..settings.count)
            .map(|_| {
                [
                    (rng.gen::<f32>() - 0.5) * settings.spread,
                    spacing * 0.5 - rng.gen::<f32>() * height,
                    (rng.gen::<f32>() - 0.5) * settings.spread,
                ]
            })
            .collect();

        let surface = colors.subscribe(SurfaceKind::Points {
            size: settings.size,
            size_attenuation: settings.size_attenuation,
        });

        log::debug!("Generated {} particles over {} sections", settings.count, section_count);
        Self { positions, surface }
    }

    /// Point positions in world space
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Surface the points are drawn with
    pub fn surface(&self) -> SurfaceKey {
        self.surface
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> ParticleSettings {
        ParticleSettings {
            seed: Some(seed),
            ..ParticleSettings::default()
        }
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut colors = ColorBroadcast::default();
        let field = ParticleField::generate(&seeded(7), 4.0, 3, &mut colors);
        assert_eq!(field.len(), 200);
        for p in field.positions() {
            assert!(p[0] >= -5.0 && p[0] <= 5.0);
            assert!(p[2] >= -5.0 && p[2] <= 5.0);
            // Top of the first section down to the bottom of the last
            assert!(p[1] <= 2.0 && p[1] >= 2.0 - 12.0);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut colors = ColorBroadcast::default();
        let a = ParticleField::generate(&seeded(42), 4.0, 3, &mut colors);
        let b = ParticleField::generate(&seeded(42), 4.0, 3, &mut colors);
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn test_registers_points_surface() {
        let mut colors = ColorBroadcast::default();
        let field = ParticleField::generate(&seeded(1), 4.0, 3, &mut colors);
        assert_eq!(colors.len(), 1);
        match colors.get(field.surface()).unwrap().kind {
            SurfaceKind::Points { size, size_attenuation } => {
                assert_eq!(size, 0.03);
                assert!(size_attenuation);
            }
            other => panic!("Expected Points surface, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sections_collapses_height() {
        let mut colors = ColorBroadcast::default();
        let field = ParticleField::generate(&seeded(3), 4.0, 0, &mut colors);
        assert!(field.positions().iter().all(|p| p[1] == 2.0));
    }
}
