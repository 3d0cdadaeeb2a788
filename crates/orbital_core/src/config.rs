//! Sketch settings and partial updates
//!
//! [`SketchConfig`] is the full set of user-facing knobs. Hosts never mutate it
//! field by field; they build a [`ConfigPatch`] and apply it, which sanitizes
//! the values and reports what actually changed as [`ConfigChanges`].

use bitflags::bitflags;
use orbital_math::Color;
use orbital_physics::{GravityMode, PhysicsConfig, ShapeKind, MIN_SHAPE_SIZE};
use serde::{Deserialize, Serialize};

/// Gravity strength after a reset
pub const DEFAULT_GRAVITY: f32 = 2.5;
/// Randomize strength after a reset
pub const DEFAULT_RANDOMIZE: f32 = 0.0;
/// Shape size after a reset
pub const DEFAULT_SHAPE_SIZE: f32 = 20.0;
/// Default collision restitution
pub const DEFAULT_RESTITUTION: f32 = 0.85;
/// Default opacity of the per-frame background wash (0x33)
pub const DEFAULT_TRAIL_ALPHA: f32 = 0.2;
/// Largest accepted spawn drift, in pixels per frame
pub const MAX_SPAWN_DRIFT: f32 = 10.0;

bitflags! {
    /// Which settings a patch changed
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ConfigChanges: u16 {
        const GRAVITY = 1 << 0;
        const RANDOMIZE = 1 << 1;
        const SHAPE_SIZE = 1 << 2;
        const BOUNCY_BORDER = 1 << 3;
        const SELECTED_KIND = 1 << 4;
        const BACKGROUND = 1 << 5;
        const RESTITUTION = 1 << 6;
        const GRAVITY_MODE = 1 << 7;
        const SPAWN_DRIFT = 1 << 8;
        const TRAIL_ALPHA = 1 << 9;
        /// Settings that feed the physics step
        const PHYSICS = Self::GRAVITY.bits()
            | Self::RANDOMIZE.bits()
            | Self::BOUNCY_BORDER.bits()
            | Self::RESTITUTION.bits()
            | Self::GRAVITY_MODE.bits();
    }
}

impl ConfigChanges {
    /// The canvas must be repainted opaque rather than washed
    pub fn needs_full_repaint(self) -> bool {
        self.contains(ConfigChanges::BACKGROUND)
    }
}

/// A numeric setting that can be nudged by a relative amount
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Setting {
    Gravity,
    Randomize,
    ShapeSize,
    Restitution,
    TrailAlpha,
}

/// User-facing sketch settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Gravitational constant
    pub gravity_strength: f32,
    /// Strength of the noise perturbation
    pub randomize_strength: f32,
    /// Linear size given to newly spawned shapes
    pub shape_size: f32,
    /// Bounce off the canvas edges instead of culling
    pub bouncy_border: bool,
    /// Kind spawned by pointer input
    pub selected_kind: ShapeKind,
    /// Canvas background
    pub background: Color,
    /// Collision restitution
    pub restitution: f32,
    /// One-sided or reciprocal gravity
    pub gravity_mode: GravityMode,
    /// Largest initial speed per axis given to new shapes
    pub spawn_drift: f32,
    /// Opacity of the background wash drawn every frame
    pub trail_alpha: f32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            gravity_strength: DEFAULT_GRAVITY,
            randomize_strength: DEFAULT_RANDOMIZE,
            shape_size: DEFAULT_SHAPE_SIZE,
            bouncy_border: false,
            selected_kind: ShapeKind::Circle,
            background: Color::BLACK,
            restitution: DEFAULT_RESTITUTION,
            gravity_mode: GravityMode::Asymmetric,
            spawn_drift: 0.0,
            trail_alpha: DEFAULT_TRAIL_ALPHA,
        }
    }
}

impl SketchConfig {
    /// Restore gravity, randomize, size and border to their defaults
    ///
    /// Kind, background and the tuning fields are kept.
    pub fn reset_sliders(&mut self) -> ConfigChanges {
        self.apply(&ConfigPatch {
            gravity_strength: Some(DEFAULT_GRAVITY),
            randomize_strength: Some(DEFAULT_RANDOMIZE),
            shape_size: Some(DEFAULT_SHAPE_SIZE),
            bouncy_border: Some(false),
            ..Default::default()
        })
    }

    /// The read-only view handed to the physics step
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig::new(self.gravity_strength)
            .with_randomize(self.randomize_strength)
            .with_bouncy_border(self.bouncy_border)
            .with_restitution(self.restitution)
            .with_gravity_mode(self.gravity_mode)
    }

    /// Apply a patch, returning the set of fields whose value changed
    pub fn apply(&mut self, patch: &ConfigPatch) -> ConfigChanges {
        let mut changes = ConfigChanges::empty();

        let numeric: [(&mut f32, Option<f32>, fn(f32) -> f32, ConfigChanges); 6] = [
            (&mut self.gravity_strength, patch.gravity_strength, non_negative, ConfigChanges::GRAVITY),
            (&mut self.randomize_strength, patch.randomize_strength, non_negative, ConfigChanges::RANDOMIZE),
            (&mut self.shape_size, patch.shape_size, shape_size, ConfigChanges::SHAPE_SIZE),
            (&mut self.restitution, patch.restitution, unit, ConfigChanges::RESTITUTION),
            (&mut self.spawn_drift, patch.spawn_drift, spawn_drift, ConfigChanges::SPAWN_DRIFT),
            (&mut self.trail_alpha, patch.trail_alpha, unit, ConfigChanges::TRAIL_ALPHA),
        ];
        for (field, value, sanitize, flag) in numeric {
            if let Some(value) = value.filter(|v| v.is_finite()).map(sanitize) {
                if *field != value {
                    *field = value;
                    changes |= flag;
                }
            }
        }

        if let Some(bouncy) = patch.bouncy_border.filter(|b| *b != self.bouncy_border) {
            self.bouncy_border = bouncy;
            changes |= ConfigChanges::BOUNCY_BORDER;
        }
        if let Some(kind) = patch.selected_kind.filter(|k| *k != self.selected_kind) {
            self.selected_kind = kind;
            changes |= ConfigChanges::SELECTED_KIND;
        }
        if let Some(background) = patch.background.filter(|c| *c != self.background) {
            self.background = background;
            changes |= ConfigChanges::BACKGROUND;
        }
        if let Some(mode) = patch.gravity_mode.filter(|m| *m != self.gravity_mode) {
            self.gravity_mode = mode;
            changes |= ConfigChanges::GRAVITY_MODE;
        }

        changes
    }

    /// Nudge a numeric setting by `delta`, with the same clamping as a patch
    pub fn adjust(&mut self, setting: Setting, delta: f32) -> ConfigChanges {
        let patch = match setting {
            Setting::Gravity => ConfigPatch::default().with_gravity(self.gravity_strength + delta),
            Setting::Randomize => ConfigPatch::default().with_randomize(self.randomize_strength + delta),
            Setting::ShapeSize => ConfigPatch::default().with_shape_size(self.shape_size + delta),
            Setting::Restitution => ConfigPatch::default().with_restitution(self.restitution + delta),
            Setting::TrailAlpha => ConfigPatch::default().with_trail_alpha(self.trail_alpha + delta),
        };
        self.apply(&patch)
    }

    /// Bring every field into its valid range
    ///
    /// Used on values deserialized from configuration files, which bypass
    /// [`SketchConfig::apply`]. Non-finite numbers fall back to defaults.
    pub fn sanitized(self) -> Self {
        let mut clean = Self::default();
        clean.apply(&ConfigPatch::from(&self));
        clean
    }
}

fn non_negative(value: f32) -> f32 {
    value.max(0.0)
}

fn unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

fn spawn_drift(value: f32) -> f32 {
    value.clamp(0.0, MAX_SPAWN_DRIFT)
}

fn shape_size(value: f32) -> f32 {
    value.max(MIN_SHAPE_SIZE)
}

/// A partial update to [`SketchConfig`]; `None` leaves a field unchanged
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigPatch {
    pub gravity_strength: Option<f32>,
    pub randomize_strength: Option<f32>,
    pub shape_size: Option<f32>,
    pub bouncy_border: Option<bool>,
    pub selected_kind: Option<ShapeKind>,
    pub background: Option<Color>,
    pub restitution: Option<f32>,
    pub gravity_mode: Option<GravityMode>,
    pub spawn_drift: Option<f32>,
    pub trail_alpha: Option<f32>,
}

impl ConfigPatch {
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity_strength = Some(gravity);
        self
    }

    pub fn with_randomize(mut self, randomize: f32) -> Self {
        self.randomize_strength = Some(randomize);
        self
    }

    pub fn with_shape_size(mut self, size: f32) -> Self {
        self.shape_size = Some(size);
        self
    }

    pub fn with_bouncy_border(mut self, bouncy: bool) -> Self {
        self.bouncy_border = Some(bouncy);
        self
    }

    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.selected_kind = Some(kind);
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = Some(mode);
        self
    }

    pub fn with_spawn_drift(mut self, drift: f32) -> Self {
        self.spawn_drift = Some(drift);
        self
    }

    pub fn with_trail_alpha(mut self, alpha: f32) -> Self {
        self.trail_alpha = Some(alpha);
        self
    }

    /// True when the patch sets nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&SketchConfig> for ConfigPatch {
    /// A patch that sets every field to the given config's value
    fn from(config: &SketchConfig) -> Self {
        Self {
            gravity_strength: Some(config.gravity_strength),
            randomize_strength: Some(config.randomize_strength),
            shape_size: Some(config.shape_size),
            bouncy_border: Some(config.bouncy_border),
            selected_kind: Some(config.selected_kind),
            background: Some(config.background),
            restitution: Some(config.restitution),
            gravity_mode: Some(config.gravity_mode),
            spawn_drift: Some(config.spawn_drift),
            trail_alpha: Some(config.trail_alpha),
        }
    }
}
