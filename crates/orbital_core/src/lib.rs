//! Core types for Orbital Shapes
//!
//! This crate ties the physics to a host:
//!
//! - [`World`] - Owns the shapes, settings, running flag and command queue
//! - [`SketchConfig`] - User-facing settings with their defaults
//! - [`ConfigPatch`] - Partial settings update, sanitized on apply
//! - [`ConfigChanges`] - Flags describing what a patch changed
//! - [`Command`] - Deferred host request applied at the next tick
//! - [`Surface`] - Drawing contract implemented by renderers

mod command;
mod config;
mod render;
mod world;

pub use command::Command;
pub use config::{
    ConfigChanges, ConfigPatch, Setting, SketchConfig, DEFAULT_GRAVITY, DEFAULT_RANDOMIZE,
    DEFAULT_RESTITUTION, DEFAULT_SHAPE_SIZE, DEFAULT_TRAIL_ALPHA, MAX_SPAWN_DRIFT,
};
pub use render::{draw_shape, Surface};
pub use world::{TickReport, World, MAX_ROTATION_SPEED, MAX_SHAPES, SHAPE_ALPHA, SPAWN_CHANNEL_MIN, SPAWN_NUDGE};

// Re-export commonly used types from the lower crates for convenience
pub use orbital_math::{Color, Vec2};
pub use orbital_physics::{Bounds, GravityMode, PhysicsConfig, PhysicsWorld, Shape, ShapeKey, ShapeKind, StepReport};
