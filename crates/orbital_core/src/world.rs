//! World container for the sketch
//!
//! The World owns the shapes (through the physics world), the settings, the
//! running flag and the queue of pending host commands.

use crate::command::Command;
use crate::config::{ConfigChanges, ConfigPatch, SketchConfig};
use crate::render::{draw_shape, Surface};
use orbital_math::{Color, Vec2};
use orbital_physics::{Bounds, PhysicsWorld, Shape, ShapeKey, ShapeKind, StepReport};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::f32::consts::TAU;

/// Most shapes alive at once; spawning beyond this evicts the oldest
pub const MAX_SHAPES: usize = 100;
/// Lowest value of each random color channel
pub const SPAWN_CHANNEL_MIN: u8 = 150;
/// Alpha given to every shape
pub const SHAPE_ALPHA: u8 = 230;
/// Largest random spin, in radians per frame
pub const MAX_ROTATION_SPEED: f32 = 0.05;
/// Offset applied to a spawn point that lands on an existing centre
pub const SPAWN_NUDGE: f32 = 0.5;

/// What a tick (or a command flush) did
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Shapes created by queued spawn commands
    pub spawned: Vec<ShapeKey>,
    /// Settings changed by queued commands
    pub changes: ConfigChanges,
    /// A clear or restart was applied
    pub cleared: bool,
    /// The canvas was resized
    pub resized: bool,
    /// Result of the physics step (empty while paused)
    pub step: StepReport,
}

impl TickReport {
    /// The host should paint the background opaque instead of washing it
    pub fn needs_full_repaint(&self) -> bool {
        self.cleared || self.resized || self.changes.needs_full_repaint()
    }
}

/// The sketch world
pub struct World {
    physics: PhysicsWorld,
    config: SketchConfig,
    running: bool,
    rng: SmallRng,
    commands: VecDeque<Command>,
}

impl World {
    /// Create an empty, paused world with default settings
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(SketchConfig::default(), width, height)
    }

    /// Create an empty, paused world with the given settings
    pub fn with_config(config: SketchConfig, width: f32, height: f32) -> Self {
        Self::build(config, width, height, SmallRng::from_entropy())
    }

    /// Reseed spawn attributes and the noise field for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        let noise_seed = self.rng.gen();
        self.physics = self.physics.with_noise_seed(noise_seed);
        self
    }

    fn build(config: SketchConfig, width: f32, height: f32, mut rng: SmallRng) -> Self {
        let config = config.sanitized();
        let physics = PhysicsWorld::with_config(config.to_physics_config(), canvas_bounds(width, height))
            .with_noise_seed(rng.gen());

        Self {
            physics,
            config,
            running: false,
            rng,
            commands: VecDeque::new(),
        }
    }

    /// Spawn a shape of `kind` at `position` using the current shape size
    ///
    /// Always succeeds; at capacity the oldest shape is evicted first. A
    /// point already occupied by a shape centre is shifted right by
    /// [`SPAWN_NUDGE`] until it is free, since forces between coincident
    /// centres are undefined and the pair would never separate.
    pub fn spawn(&mut self, position: Vec2, kind: ShapeKind) -> ShapeKey {
        if self.physics.shape_count() >= MAX_SHAPES {
            if let Some((evicted, _)) = self.physics.pop_oldest() {
                log::debug!("Evicted oldest shape {:?}", evicted);
            }
        }

        let position = self.free_spawn_point(position);
        let shape = self.random_shape(position, kind);
        let key = self.physics.add_shape(shape);
        log::debug!("Spawned {} at ({:.1}, {:.1})", kind, position.x, position.y);
        key
    }

    /// Spawn the selected kind at canvas coordinates
    ///
    /// Points on or outside the canvas edge are ignored.
    pub fn spawn_at(&mut self, x: f32, y: f32) -> Option<ShapeKey> {
        let point = Vec2::new(x, y);
        if !self.physics.bounds().contains(point) {
            return None;
        }
        Some(self.spawn(point, self.config.selected_kind))
    }

    fn free_spawn_point(&self, mut position: Vec2) -> Vec2 {
        for _ in 0..MAX_SHAPES {
            let taken = self
                .physics
                .iter()
                .any(|(_, shape)| shape.position.distance(position) < SPAWN_NUDGE * 0.5);
            if !taken {
                break;
            }
            position.x += SPAWN_NUDGE;
        }
        position
    }

    fn random_shape(&mut self, position: Vec2, kind: ShapeKind) -> Shape {
        let drift = self.config.spawn_drift;
        let velocity = if drift > 0.0 {
            Vec2::new(self.rng.gen_range(-drift..=drift), self.rng.gen_range(-drift..=drift))
        } else {
            Vec2::ZERO
        };

        let color = Color::new(
            self.rng.gen_range(SPAWN_CHANNEL_MIN..=u8::MAX),
            self.rng.gen_range(SPAWN_CHANNEL_MIN..=u8::MAX),
            self.rng.gen_range(SPAWN_CHANNEL_MIN..=u8::MAX),
            SHAPE_ALPHA,
        );

        Shape::new(kind, position, self.config.shape_size)
            .with_velocity(velocity)
            .with_rotation(self.rng.gen_range(0.0..TAU))
            .with_rotation_speed(self.rng.gen_range(-MAX_ROTATION_SPEED..=MAX_ROTATION_SPEED))
            .with_color(color)
    }

    /// Remove every shape and reset gravity, randomize, size and border
    ///
    /// The running flag is left alone.
    pub fn clear(&mut self) -> ConfigChanges {
        self.physics.clear();
        let changes = self.config.reset_sliders();
        self.physics.config = self.config.to_physics_config();
        log::info!("World cleared");
        changes
    }

    /// Start or pause the simulation
    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            self.running = running;
            log::info!("Simulation {}", if running { "running" } else { "paused" });
        }
    }

    /// Whether the simulation is running
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply a settings patch, returning what changed
    pub fn set_config(&mut self, patch: &ConfigPatch) -> ConfigChanges {
        let changes = self.config.apply(patch);
        if changes.intersects(ConfigChanges::PHYSICS) {
            self.physics.config = self.config.to_physics_config();
        }
        if !changes.is_empty() {
            log::debug!("Config changed: {:?}", changes);
        }
        changes
    }

    /// Current settings
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Update the canvas size used for spawning and the border policies
    pub fn resize(&mut self, width: f32, height: f32) {
        let bounds = canvas_bounds(width, height);
        if bounds != self.physics.bounds() {
            self.physics.set_bounds(bounds);
            log::info!("Canvas resized to {}x{}", bounds.width, bounds.height);
        }
    }

    /// Canvas size
    pub fn canvas_size(&self) -> Bounds {
        self.physics.bounds()
    }

    /// Advance the simulation one frame if running
    pub fn step(&mut self) -> StepReport {
        if !self.running {
            return StepReport::default();
        }

        let report = self.physics.step();
        if !report.removed.is_empty() {
            log::debug!("Culled {} off-screen shape(s)", report.removed.len());
        }
        report
    }

    /// Wash the canvas with the translucent background, then draw each shape
    /// in insertion order
    ///
    /// Never mutates the world, so a paused world renders frozen poses.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill(self.config.background.with_opacity(self.config.trail_alpha));
        for (_, shape) in self.physics.iter() {
            draw_shape(surface, shape);
        }
    }

    /// Queue a command to be applied at the start of the next tick
    pub fn queue(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Number of commands waiting
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Apply every queued command in arrival order
    pub fn flush_commands(&mut self) -> TickReport {
        let mut report = TickReport::default();

        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::SpawnAt { x, y } => {
                    report.spawned.extend(self.spawn_at(x, y));
                }
                Command::Spawn { position, kind } => {
                    report.spawned.push(self.spawn(position, kind));
                }
                Command::Configure(patch) => {
                    report.changes |= self.set_config(&patch);
                }
                Command::Adjust { setting, delta } => {
                    let changes = self.config.adjust(setting, delta);
                    self.physics.config = self.config.to_physics_config();
                    report.changes |= changes;
                }
                Command::ToggleBouncyBorder => {
                    let bouncy = !self.config.bouncy_border;
                    report.changes |= self.set_config(&ConfigPatch::default().with_bouncy_border(bouncy));
                }
                Command::SetRunning(running) => self.set_running(running),
                Command::ToggleRunning => self.set_running(!self.running),
                Command::Clear => {
                    report.changes |= self.clear();
                    report.cleared = true;
                }
                Command::Restart => {
                    report.changes |= self.clear();
                    self.set_running(false);
                    report.cleared = true;
                }
                Command::Resize { width, height } => {
                    self.resize(width, height);
                    report.resized = true;
                }
            }
        }

        report
    }

    /// Apply queued commands, then step
    pub fn tick(&mut self) -> TickReport {
        let mut report = self.flush_commands();
        report.step = self.step();
        report
    }

    /// Number of live shapes
    #[inline]
    pub fn shape_count(&self) -> usize {
        self.physics.shape_count()
    }

    /// Check if the world has no shapes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.physics.shape_count() == 0
    }

    /// Iterate over shapes in insertion order
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeKey, &Shape)> + '_ {
        self.physics.iter()
    }

    /// Get a shape by key
    pub fn get(&self, key: ShapeKey) -> Option<&Shape> {
        self.physics.get_shape(key)
    }

    /// Get the physics world
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Number of physics steps taken
    pub fn frame(&self) -> u64 {
        self.physics.frame()
    }
}

fn canvas_bounds(width: f32, height: f32) -> Bounds {
    let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Bounds::new(sanitize(width), sanitize(height))
}
