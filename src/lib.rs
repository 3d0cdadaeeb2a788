//! Orbital Shapes application library
//!
//! Host-side pieces of the sketch: configuration loading, input mapping and
//! the window, simulation and presentation systems used by the binary.

pub mod config;
pub mod input;
pub mod systems;
