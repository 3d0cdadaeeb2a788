//! Fixed-rate simulation system
//!
//! Runs the world at a fixed tick rate independent of the display refresh:
//! - Frame time accumulation
//! - Catch-up ticks, capped per frame
//! - Batching each tick's drawing for the canvas

use std::time::{Duration, Instant};
use orbital_core::World;
use orbital_render::ShapeBatch;
use crate::config::SimulationConfig;

/// Accumulates frame time and hands out whole ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick: Duration,
    max_ticks: u32,
    accumulator: Duration,
}

impl FrameClock {
    /// Create a clock running `tick_rate` ticks per second
    pub fn new(tick_rate: f32, max_ticks: u32) -> Self {
        let tick_rate = if tick_rate.is_finite() && tick_rate > 0.0 { tick_rate } else { 30.0 };
        Self {
            tick: Duration::from_secs_f32(1.0 / tick_rate),
            max_ticks: max_ticks.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Add elapsed time and return how many ticks are due
    ///
    /// Backlog beyond `max_ticks` is dropped so a stalled window does not
    /// fast-forward the sketch when it comes back.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.tick && ticks < self.max_ticks {
            self.accumulator -= self.tick;
            ticks += 1;
        }

        if self.accumulator >= self.tick {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Length of one tick
    pub fn tick_duration(&self) -> Duration {
        self.tick
    }
}

/// Summary of the ticks run during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameResult {
    /// Ticks run this frame
    pub ticks: u32,
    /// Shapes spawned by queued commands
    pub spawned: usize,
    /// Shapes culled off screen
    pub removed: usize,
    /// Collision impulses applied
    pub collisions: usize,
    /// The canvas was repainted opaque at least once
    pub repainted: bool,
}

impl FrameResult {
    /// Whether anything visible happened
    pub fn is_idle(&self) -> bool {
        self.ticks == 0
    }
}

/// Drives the world from wall-clock time
pub struct SimulationSystem {
    clock: FrameClock,
    last_frame: Instant,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            clock: FrameClock::new(config.tick_rate, config.max_ticks_per_frame),
            last_frame: Instant::now(),
        }
    }

    /// Run the ticks that are due since the last call
    pub fn update(&mut self, world: &mut World, batch: &mut ShapeBatch) -> FrameResult {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        let ticks = self.clock.advance(elapsed);
        Self::run_ticks(world, batch, ticks)
    }

    /// Run `ticks` ticks, drawing the world into `batch` after each one
    ///
    /// A tick that clears, resizes, or changes the background repaints the
    /// canvas opaque first so old trails do not linger.
    pub fn run_ticks(world: &mut World, batch: &mut ShapeBatch, ticks: u32) -> FrameResult {
        let mut result = FrameResult {
            ticks,
            ..Default::default()
        };

        for _ in 0..ticks {
            let report = world.tick();

            if report.resized {
                let size = world.canvas_size();
                batch.resize(size.width as u32, size.height as u32, world.config().background);
            }
            if report.needs_full_repaint() {
                batch.full_clear(world.config().background);
                result.repainted = true;
            }

            world.render(batch);

            result.spawned += report.spawned.len();
            result.removed += report.step.removed.len();
            result.collisions += report.step.collisions;
        }

        result
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbital_core::{Color, Command, ConfigPatch, ShapeKind, Vec2};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_clock_accumulates_partial_frames() {
        let mut clock = FrameClock::new(30.0, 4);
        // 16ms frames at 60Hz: roughly every second frame is due a tick
        assert_eq!(clock.advance(ms(16)), 0);
        assert_eq!(clock.advance(ms(16)), 0);
        assert_eq!(clock.advance(ms(16)), 1);
    }

    #[test]
    fn test_clock_catch_up_is_capped() {
        let mut clock = FrameClock::new(30.0, 4);
        assert_eq!(clock.advance(Duration::from_secs(2)), 4);
        // Backlog was dropped
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_clock_sanitizes_rate() {
        let clock = FrameClock::new(0.0, 0);
        assert_eq!(clock.tick_duration(), Duration::from_secs_f32(1.0 / 30.0));
        assert_eq!(clock.max_ticks, 1);
    }

    fn drawn_batch(width: u32, height: u32) -> ShapeBatch {
        let mut batch = ShapeBatch::new(width, height);
        batch.finish();
        batch
    }

    #[test]
    fn test_run_ticks_applies_commands_and_paints() {
        let mut world = World::new(40.0, 40.0).with_seed(3);
        let mut batch = drawn_batch(40, 40);
        world.queue(Command::Spawn {
            position: Vec2::new(20.0, 20.0),
            kind: ShapeKind::Square,
        });

        let result = SimulationSystem::run_ticks(&mut world, &mut batch, 1);
        assert_eq!(result.ticks, 1);
        assert_eq!(result.spawned, 1);

        // Wash quad first, then the square as two triangles
        let (_, square) = world.shapes().next().unwrap();
        let vertices = batch.vertices();
        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].color, Color::new(0, 0, 0, 51).to_f32_array());
        assert_eq!(vertices[6].color, square.color.to_f32_array());
    }

    #[test]
    fn test_zero_ticks_leaves_queue() {
        let mut world = World::new(40.0, 40.0);
        let mut batch = drawn_batch(40, 40);
        world.queue(Command::SetRunning(true));

        let result = SimulationSystem::run_ticks(&mut world, &mut batch, 0);
        assert!(result.is_idle());
        assert!(batch.is_empty());
        assert_eq!(world.pending_commands(), 1);
        assert!(!world.is_running());
    }

    #[test]
    fn test_background_change_repaints() {
        let mut world = World::new(10.0, 10.0);
        let mut batch = drawn_batch(10, 10);
        let blue = Color::rgb(0, 0, 200);
        world.queue(Command::Configure(ConfigPatch::default().with_background(blue)));

        let result = SimulationSystem::run_ticks(&mut world, &mut batch, 1);
        assert!(result.repainted);
        assert_eq!(batch.pending_clear(), Some(blue));
    }

    #[test]
    fn test_frame_accumulates_ticks_into_one_batch() {
        let mut world = World::new(40.0, 40.0);
        let mut batch = drawn_batch(40, 40);

        SimulationSystem::run_ticks(&mut world, &mut batch, 3);
        assert_eq!(batch.pending_clear(), None);
        assert_eq!(batch.vertices().len(), 3 * 6);
    }

    #[test]
    fn test_resize_command_resizes_canvas() {
        let mut world = World::new(10.0, 10.0);
        let mut batch = drawn_batch(10, 10);
        world.queue(Command::Resize { width: 30.0, height: 20.0 });

        SimulationSystem::run_ticks(&mut world, &mut batch, 1);
        assert_eq!((batch.width(), batch.height()), (30, 20));
        assert_eq!(batch.pending_clear(), Some(world.config().background));
    }
}
