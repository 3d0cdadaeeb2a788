//! Deferred host commands
//!
//! Input arrives between frames but must never land in the middle of a
//! physics step. Hosts queue [`Command`]s on the world and they are applied in
//! arrival order at the start of the next tick.

use crate::config::{ConfigPatch, Setting};
use orbital_math::Vec2;
use orbital_physics::ShapeKind;

/// A request from the host to change the world
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Spawn the selected kind at canvas coordinates, if inside the canvas
    SpawnAt { x: f32, y: f32 },
    /// Spawn a specific kind at a point, unconditionally
    Spawn { position: Vec2, kind: ShapeKind },
    /// Apply a settings patch
    Configure(ConfigPatch),
    /// Nudge a numeric setting by a relative amount
    Adjust { setting: Setting, delta: f32 },
    /// Flip the bouncy border
    ToggleBouncyBorder,
    /// Start or pause the simulation
    SetRunning(bool),
    /// Flip between running and paused
    ToggleRunning,
    /// Remove every shape and reset the sliders
    Clear,
    /// Clear and pause
    Restart,
    /// The canvas changed size
    Resize { width: f32, height: f32 },
}
