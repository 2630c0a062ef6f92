//! Page composition
//!
//! Turns the loaded model fragments into positioned sections of the scene graph.

mod scene_composer;

pub use scene_composer::{Section, SectionList, SceneComposer};
