//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

pub mod animation;
mod color_panel;
mod loading;
mod render;
mod window;

pub use animation::{AnimationDriver, DriverState, FrameClock};
pub use color_panel::ColorPanel;
pub use loading::{on_models_loaded, AppEvent, LoadResult, LoadingSystem};
pub use render::{RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
