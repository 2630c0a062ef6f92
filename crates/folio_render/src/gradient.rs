//! Toon gradient map
//!
//! A one-row lookup table of light levels. The toon shader indexes it with
//! `dot(N, L) * 0.5 + 0.5` using nearest filtering, so each texel becomes one
//! flat band of shading.

use std::fmt;
use std::path::Path;

/// Widest gradient the default device limits can hold as a 2D texture
pub const MAX_GRADIENT_WIDTH: usize = 8192;

/// Errors while reading a gradient image
#[derive(Debug)]
pub enum GradientError {
    /// The image could not be opened or decoded
    Image(image::ImageError),
    /// The image has no pixels
    Empty,
    /// More texels than a texture row can hold
    TooWide(usize),
}

impl fmt::Display for GradientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientError::Image(e) => write!(f, "Gradient image error: {}", e),
            GradientError::Empty => write!(f, "Gradient image is empty"),
            GradientError::TooWide(width) => write!(
                f,
                "Gradient image is {} texels wide (max {})",
                width, MAX_GRADIENT_WIDTH
            ),
        }
    }
}

impl std::error::Error for GradientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GradientError::Image(e) => Some(e),
            GradientError::Empty | GradientError::TooWide(_) => None,
        }
    }
}

impl From<image::ImageError> for GradientError {
    fn from(e: image::ImageError) -> Self {
        GradientError::Image(e)
    }
}

/// Light levels of a toon ramp, darkest band first
#[derive(Clone, Debug, PartialEq)]
pub struct GradientMap {
    levels: Vec<u8>,
}

impl GradientMap {
    /// Build a map from explicit levels
    pub fn from_levels(levels: Vec<u8>) -> Result<Self, GradientError> {
        if levels.is_empty() {
            return Err(GradientError::Empty);
        }
        if levels.len() > MAX_GRADIENT_WIDTH {
            return Err(GradientError::TooWide(levels.len()));
        }
        Ok(Self { levels })
    }

    /// Built-in ramp: shadow, midtone, highlight
    pub fn three_band() -> Self {
        Self { levels: vec![0, 128, 255] }
    }

    /// Read the luminance of the first row of an image
    pub fn from_image(path: &Path) -> Result<Self, GradientError> {
        let luma = image::open(path)?.to_luma8();
        if luma.width() == 0 || luma.height() == 0 {
            return Err(GradientError::Empty);
        }
        if luma.width() as usize > MAX_GRADIENT_WIDTH {
            return Err(GradientError::TooWide(luma.width() as usize));
        }
        let levels = (0..luma.width()).map(|x| luma.get_pixel(x, 0).0[0]).collect();
        Self::from_levels(levels)
    }

    /// Load from `path`, falling back to [`three_band`](Self::three_band)
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_image(path) {
            Ok(map) => {
                log::info!("Loaded {}-band gradient from {}", map.len(), path.display());
                map
            }
            Err(e) => {
                log::warn!(
                    "Using built-in three-band gradient ({}: {})",
                    path.display(),
                    e
                );
                Self::three_band()
            }
        }
    }

    /// Number of bands
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Band a shading coordinate in `[0, 1]` falls into, as the GPU's nearest
    /// sampler picks it
    pub fn band(&self, coord: f32) -> f32 {
        let n = self.levels.len();
        let index = ((coord.clamp(0.0, 1.0) * n as f32) as usize).min(n - 1);
        self.levels[index] as f32 / 255.0
    }

    /// Upload as an `n x 1` texture and return its view
    pub fn create_texture_view(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: self.levels.len() as u32,
            height: 1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Gradient Map"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.levels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.levels.len() as u32),
                rows_per_image: Some(1),
            },
            size,
        );
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_band_lookup() {
        let map = GradientMap::three_band();
        assert_eq!(map.band(0.0), 0.0);
        assert!((map.band(0.5) - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(map.band(1.0), 1.0);
        // Facing away from the light lands in the shadow band
        assert_eq!(map.band(0.2), 0.0);
    }

    #[test]
    fn test_empty_levels_rejected() {
        assert!(matches!(GradientMap::from_levels(Vec::new()), Err(GradientError::Empty)));
    }

    #[test]
    fn test_too_wide_levels_rejected() {
        let levels = vec![0; MAX_GRADIENT_WIDTH + 1];
        assert!(matches!(
            GradientMap::from_levels(levels),
            Err(GradientError::TooWide(w)) if w == MAX_GRADIENT_WIDTH + 1
        ));
        assert!(GradientMap::from_levels(vec![0; MAX_GRADIENT_WIDTH]).is_ok());
    }

    #[test]
    fn test_too_wide_image_falls_back() {
        let dir = std::env::temp_dir().join("folio_gradient_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("wide.png");
        let width = (MAX_GRADIENT_WIDTH + 8) as u32;
        image::GrayImage::from_fn(width, 1, |x, _| image::Luma([(x % 256) as u8]))
            .save(&path)
            .unwrap();

        assert!(matches!(GradientMap::from_image(&path), Err(GradientError::TooWide(_))));
        assert_eq!(GradientMap::load_or_default(&path), GradientMap::three_band());
    }

    #[test]
    fn test_missing_image_falls_back() {
        let map = GradientMap::load_or_default(Path::new("/nonexistent/gradient.png"));
        assert_eq!(map, GradientMap::three_band());
    }

    #[test]
    fn test_reads_first_row_luminance() {
        let dir = std::env::temp_dir().join("folio_gradient_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ramp.png");
        let img = image::GrayImage::from_fn(5, 2, |x, y| image::Luma([if y == 0 { (x * 60) as u8 } else { 255 }]));
        img.save(&path).unwrap();

        let map = GradientMap::from_image(&path).unwrap();
        assert_eq!(map.levels(), &[0, 60, 120, 180, 240]);
    }
}
