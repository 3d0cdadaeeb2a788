//! Physics world and per-frame step

use crate::body::{Shape, ShapeKey};
use crate::border::{apply_bouncy_border, is_off_screen, Bounds};
use crate::collision::{detect, resolve_impulse, separate};
use crate::gravity::{gravitational_force, GravityMode};
use crate::jitter::jitter;
use orbital_math::NoiseField;
use slotmap::SlotMap;
use std::collections::VecDeque;

/// Time advanced by one step, in frames
///
/// Velocities are expressed in pixels per frame, so integration multiplies by one.
pub const FRAME_DT: f32 = 1.0;
/// Speed limit at zero gravity
pub const BASE_MAX_SPEED: f32 = 4.0;
/// Extra speed allowed per unit of gravity strength
pub const MAX_SPEED_PER_GRAVITY: f32 = 0.4;

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravitational constant G
    pub gravity: f32,
    /// Strength of the noise perturbation
    pub randomize: f32,
    /// Bounce off canvas edges instead of culling off-screen shapes
    pub bouncy_border: bool,
    /// Coefficient of restitution for shape-shape collisions
    pub restitution: f32,
    /// Whether gravity is applied one-sided or to both shapes of a pair
    pub gravity_mode: GravityMode,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 2.5,
            randomize: 0.0,
            bouncy_border: false,
            restitution: 0.85,
            gravity_mode: GravityMode::Asymmetric,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }

    /// Set the noise perturbation strength
    pub fn with_randomize(mut self, randomize: f32) -> Self {
        self.randomize = randomize;
        self
    }

    /// Enable or disable the bouncy border
    pub fn with_bouncy_border(mut self, bouncy_border: bool) -> Self {
        self.bouncy_border = bouncy_border;
        self
    }

    /// Set restitution, clamped to [0, 1]
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Set the gravity mode
    pub fn with_gravity_mode(mut self, gravity_mode: GravityMode) -> Self {
        self.gravity_mode = gravity_mode;
        self
    }

    /// Speed limit derived from the gravity strength
    #[inline]
    pub fn max_speed(&self) -> f32 {
        BASE_MAX_SPEED + MAX_SPEED_PER_GRAVITY * self.gravity.max(0.0)
    }
}

/// What happened during one step
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Shapes culled for leaving the canvas, in insertion order
    pub removed: Vec<ShapeKey>,
    /// Wall bounces (velocity reversals)
    pub bounces: usize,
    /// Collision impulses applied
    pub collisions: usize,
}

/// The physics world containing all shapes
pub struct PhysicsWorld {
    /// All shapes (using generational keys)
    shapes: SlotMap<ShapeKey, Shape>,
    /// Keys in insertion order; the front is the oldest
    order: VecDeque<ShapeKey>,
    /// Physics configuration
    pub config: PhysicsConfig,
    bounds: Bounds,
    noise: NoiseField,
    frame: u64,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new(bounds: Bounds) -> Self {
        Self::with_config(PhysicsConfig::default(), bounds)
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig, bounds: Bounds) -> Self {
        Self {
            shapes: SlotMap::with_key(),
            order: VecDeque::new(),
            config,
            bounds,
            noise: NoiseField::default(),
            frame: 0,
        }
    }

    /// Use a noise field with the given seed for the perturbation
    pub fn with_noise_seed(mut self, seed: u32) -> Self {
        self.noise = NoiseField::new(seed);
        self
    }

    /// Add a shape at the back of the insertion order and return its key
    pub fn add_shape(&mut self, shape: Shape) -> ShapeKey {
        let key = self.shapes.insert(shape);
        self.order.push_back(key);
        key
    }

    /// Remove a shape from the world and return it
    pub fn remove_shape(&mut self, key: ShapeKey) -> Option<Shape> {
        let shape = self.shapes.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(shape)
    }

    /// Remove and return the oldest shape
    pub fn pop_oldest(&mut self) -> Option<(ShapeKey, Shape)> {
        let key = self.order.pop_front()?;
        self.shapes.remove(key).map(|shape| (key, shape))
    }

    /// Get an immutable reference to a shape by key
    pub fn get_shape(&self, key: ShapeKey) -> Option<&Shape> {
        self.shapes.get(key)
    }

    /// Get the number of shapes in the world
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Iterate over shapes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &Shape)> + '_ {
        self.order
            .iter()
            .filter_map(move |&key| self.shapes.get(key).map(|shape| (key, shape)))
    }

    /// Iterate over shape keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = ShapeKey> + '_ {
        self.order.iter().copied()
    }

    /// Remove every shape
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
    }

    /// Canvas bounds used by the border policies
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Update the canvas bounds
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Number of steps taken so far (the noise time axis)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Step the simulation forward by one frame
    ///
    /// Each shape is updated in insertion order, fully, before the next:
    /// 1. Gravitational pull from every other shape
    /// 2. Noise perturbation
    /// 3. Speed clamp
    /// 4. Integration of position and rotation
    /// 5. Bouncy border (when enabled)
    /// 6. Overlap separation and collision impulse against every other shape
    ///
    /// With the bouncy border off, off-screen shapes are then collected and
    /// removed after the pass.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        let keys: Vec<ShapeKey> = self.order.iter().copied().collect();

        for index in 0..keys.len() {
            self.update_shape(index, &keys, &mut report);
        }

        if !self.config.bouncy_border {
            let bounds = self.bounds;
            report.removed = self
                .iter()
                .filter(|(_, shape)| is_off_screen(shape, bounds))
                .map(|(key, _)| key)
                .collect();
            for &key in &report.removed {
                self.remove_shape(key);
            }
        }

        self.frame = self.frame.wrapping_add(1);
        report
    }

    fn update_shape(&mut self, index: usize, keys: &[ShapeKey], report: &mut StepReport) {
        let key = keys[index];
        let config = self.config.clone();
        let reciprocal = config.gravity_mode.is_reciprocal();

        // Phase 1: gravity
        for (other_index, &other_key) in keys.iter().enumerate() {
            // Reciprocal pairs were already handled from the earlier shape's side
            if other_index == index || (reciprocal && other_index < index) {
                continue;
            }
            let Some([body, other]) = self.shapes.get_disjoint_mut([key, other_key]) else {
                continue;
            };
            if let Some(force) = gravitational_force(body, other, config.gravity) {
                body.apply_impulse(force);
                if reciprocal {
                    other.apply_impulse(-force);
                }
            }
        }

        let Some(body) = self.shapes.get_mut(key) else {
            return;
        };

        // Phase 2: perturbation
        body.velocity += jitter(&self.noise, body.position, self.frame, config.randomize);

        // Phase 3: speed clamp
        body.velocity = body.velocity.clamp_length(config.max_speed());

        // Phase 4: integrate
        body.position += body.velocity * FRAME_DT;
        body.rotation += body.rotation_speed * FRAME_DT;

        // Phase 5: border
        if config.bouncy_border && apply_bouncy_border(body, self.bounds) {
            report.bounces += 1;
        }

        // Phase 6: collisions
        for (other_index, &other_key) in keys.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let Some([body, other]) = self.shapes.get_disjoint_mut([key, other_key]) else {
                continue;
            };
            if let Some(contact) = detect(body, other) {
                separate(body, other, &contact);
                if resolve_impulse(body, other, &contact, config.restitution) {
                    report.collisions += 1;
                }
            }
        }
    }
}
