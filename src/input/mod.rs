//! Input handling module
//!
//! Provides input mapping from raw events to semantic actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction, GRAVITY_STEP, RANDOMIZE_STEP, SIZE_STEP};
