//! 2D shape physics for Orbital Shapes
//!
//! This crate provides the simulation side of the sketch:
//! - Shape kinds and their geometry table
//! - Shape bodies with area-derived mass
//! - Pairwise toy gravity with short-range repulsion
//! - Overlap separation and restitution impulses
//! - Bouncy or culling canvas borders
//! - The per-frame step over an insertion-ordered arena

pub mod body;
pub mod border;
pub mod collision;
pub mod gravity;
pub mod jitter;
pub mod kind;
pub mod world;

// Re-export commonly used types
pub use body::{mass_for, Shape, ShapeKey, MAX_MASS, MIN_MASS, MIN_SHAPE_SIZE};
pub use border::{apply_bouncy_border, is_off_screen, Bounds, OFF_SCREEN_MARGIN_RATIO};
pub use collision::{detect, resolve_impulse, separate, Contact};
pub use gravity::{gravitational_force, GravityMode};
pub use kind::{KindProfile, Outline, ShapeKind};
pub use world::{PhysicsConfig, PhysicsWorld, StepReport, FRAME_DT};
