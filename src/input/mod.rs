//! Input handling module
//!
//! Provides input mapping from raw key events to page actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
