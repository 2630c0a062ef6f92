//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`FOLIO_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use folio_core::{Color, Ease, ModelRequest, ParticleSettings};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Page layout and assets
    #[serde(default)]
    pub page: PageConfig,
    /// Shared material color
    #[serde(default)]
    pub material: MaterialConfig,
    /// Background particles
    #[serde(default)]
    pub particles: ParticleSettings,
    /// Animation tuning
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`FOLIO_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // FOLIO_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("FOLIO_").split("__"));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the page cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page.section_spacing <= 0.0 {
            return Err(ConfigError::invalid("page.section_spacing must be positive"));
        }
        if self.animation.max_frame_delta <= 0.0 {
            return Err(ConfigError::invalid("animation.max_frame_delta must be positive"));
        }
        if self.animation.section_tween.duration < 0.0 {
            return Err(ConfigError::invalid("animation.section_tween.duration must not be negative"));
        }
        Ok(())
    }

    /// Base color followed by the remaining palette entries, without repeats
    pub fn color_palette(&self) -> Vec<Color> {
        let mut palette = vec![self.material.color];
        for color in &self.material.palette {
            if !palette.contains(color) {
                palette.push(*color);
            }
        }
        palette
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Scrollfolio".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Distance from the camera to the model plane
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 35.0,
            near: 0.1,
            far: 100.0,
            distance: 6.0,
        }
    }
}

/// Page layout and assets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// World units between two sections
    pub section_spacing: f32,
    /// Logical pixels scrolled per wheel line
    pub line_height: f32,
    /// Toon gradient image
    pub gradient_map: PathBuf,
    /// Models in page order
    pub models: Vec<ModelRequest>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            section_spacing: 4.0,
            line_height: 40.0,
            gradient_map: PathBuf::from("assets/textures/gradients/3.jpg"),
            models: vec![
                ModelRequest::new("assets/models/1.glb", 0, 2.0),
                ModelRequest::new("assets/models/2.glb", 1, -2.0),
                ModelRequest::new("assets/models/3.glb", 2, 2.0),
            ],
        }
    }
}

/// Shared material color
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// Initial color of every surface
    pub color: Color,
    /// Colors the color panel cycles through after the initial one
    pub palette: Vec<Color>,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        let hex = |s: &str| Color::from_hex(s).unwrap_or_default();
        Self {
            color: hex("#ffeded"),
            palette: vec![hex("#ff6b6b"), hex("#ffd166"), hex("#06d6a0"), hex("#118ab2")],
        }
    }
}

/// Rotation tween started when a section comes into view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Duration in seconds
    pub duration: f32,
    /// Easing curve
    pub ease: Ease,
    /// Relative rotation [x, y, z] in radians
    pub rotation: [f32; 3],
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration: 1.5,
            ease: Ease::Power2InOut,
            rotation: [6.0, 3.0, 1.5],
        }
    }
}

/// Animation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Rate at which the camera rig follows the cursor (per second)
    pub parallax_damping: f32,
    /// Rig offset at the window edge
    pub parallax_amplitude: f32,
    /// Continuous spin around X (radians per second)
    pub spin_x: f32,
    /// Continuous spin around Y (radians per second)
    pub spin_y: f32,
    /// Longest frame step in seconds
    pub max_frame_delta: f32,
    /// Tween played on section change
    pub section_tween: TweenConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            parallax_damping: 5.0,
            parallax_amplitude: 0.5,
            spin_x: 0.1,
            spin_y: 0.12,
            max_frame_delta: 0.1,
            section_tween: TweenConfig::default(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Clear color
    pub background_color: Color,
    /// Direction toward the directional light [x, y, z]
    pub light_position: [f32; 3],
    /// Light color
    pub light_color: Color,
    /// Light intensity
    pub light_intensity: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: Color::from_hex("#1e1a20").unwrap_or(Color::BLACK),
            light_position: [1.0, 1.0, 0.0],
            light_color: Color::WHITE,
            light_intensity: 1.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Show section and scroll position in the window title
    pub title_stats: bool,
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError {
            message: message.to_string(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
