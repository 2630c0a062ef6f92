//! Page input handling
//!
//! Tracks the cursor and the virtual page scroll, and smooths the camera rig
//! toward the cursor.

mod input_tracker;
mod parallax;

pub use input_tracker::{InputTracker, SectionCrossing};
pub use parallax::{ParallaxController, RigControl};
