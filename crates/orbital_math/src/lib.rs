//! 2D Mathematics Library
//!
//! This crate provides the small set of value types shared by the Orbital
//! Shapes crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector in canvas pixel space
//! - [`Color`] - 8-bit RGBA color with hex parsing
//! - [`NoiseField`] - seeded coherent noise over (x, y, time)

mod vec2;
mod color;
pub mod noise;

pub use vec2::Vec2;
pub use color::{Color, ColorParseError};
pub use noise::NoiseField;
