//! Integration tests for the world lifecycle
//!
//! These tests drive the public `World` API the way a host does:
//! 1. Spawning and capacity eviction
//! 2. Running / paused behaviour and rendering
//! 3. Border policies over many frames
//! 4. Collision response through full steps
//! 5. Clearing and settings resets

use orbital_core::{
    Color, Command, ConfigPatch, ShapeKind, Surface, Vec2, World, DEFAULT_GRAVITY, DEFAULT_RANDOMIZE,
    DEFAULT_SHAPE_SIZE, MAX_SHAPES,
};

/// Surface that records draw calls instead of painting
#[derive(Default)]
struct RecordingSurface {
    fills: Vec<Color>,
    circles: Vec<(Vec2, f32)>,
    polygons: Vec<Vec<Vec2>>,
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn fill(&mut self, color: Color) {
        self.fills.push(color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.circles.push((center, radius));
    }

    fn fill_polygon(&mut self, points: &[Vec2], _color: Color) {
        self.polygons.push(points.to_vec());
    }
}

fn running_world(patch: ConfigPatch) -> World {
    let mut world = World::new(800.0, 600.0).with_seed(1234);
    world.set_config(&patch);
    world.set_running(true);
    world
}

// ==================== Capacity Tests ====================

#[test]
fn test_never_more_than_max_shapes() {
    let mut world = World::new(800.0, 600.0).with_seed(1);
    for i in 0..(MAX_SHAPES * 2) {
        world.spawn(Vec2::new(10.0 + (i % 70) as f32 * 10.0, 300.0), ShapeKind::Square);
        assert!(world.shape_count() <= MAX_SHAPES);
    }
    assert_eq!(world.shape_count(), MAX_SHAPES);
}

#[test]
fn test_overflow_evicts_exactly_the_oldest() {
    let mut world = World::new(800.0, 600.0).with_seed(2);
    let keys: Vec<_> = (0..MAX_SHAPES)
        .map(|i| world.spawn(Vec2::new(5.0 + i as f32 * 7.0, 100.0), ShapeKind::Circle))
        .collect();

    let newest = world.spawn(Vec2::new(400.0, 400.0), ShapeKind::Triangle);

    assert_eq!(world.shape_count(), MAX_SHAPES);
    assert!(world.get(keys[0]).is_none());
    assert!(keys[1..].iter().all(|k| world.get(*k).is_some()));

    // The newcomer sits at the back of the insertion order
    let order: Vec<_> = world.shapes().map(|(k, _)| k).collect();
    assert_eq!(order.first(), Some(&keys[1]));
    assert_eq!(order.last(), Some(&newest));
}

// ==================== Running / Paused Tests ====================

#[test]
fn test_paused_render_does_not_mutate() {
    let mut world = World::new(800.0, 600.0).with_seed(3);
    world.spawn(Vec2::new(100.0, 100.0), ShapeKind::Circle);
    world.spawn(Vec2::new(300.0, 120.0), ShapeKind::Square);
    world.spawn(Vec2::new(200.0, 400.0), ShapeKind::Triangle);

    let before: Vec<_> = world.shapes().map(|(_, s)| s.clone()).collect();
    let mut surface = RecordingSurface::default();
    for _ in 0..10 {
        world.tick();
        world.render(&mut surface);
    }
    let after: Vec<_> = world.shapes().map(|(_, s)| s.clone()).collect();

    assert_eq!(before, after);
    assert_eq!(surface.circles.len(), 10);
    assert_eq!(surface.polygons.len(), 20);
}

#[test]
fn test_render_washes_then_draws_in_order() {
    let mut world = World::new(800.0, 600.0).with_seed(4);
    world.spawn(Vec2::new(100.0, 100.0), ShapeKind::Circle);
    world.spawn(Vec2::new(300.0, 300.0), ShapeKind::Circle);

    let mut surface = RecordingSurface::default();
    world.render(&mut surface);

    assert_eq!(surface.fills, vec![Color::new(0, 0, 0, 51)]);
    let centres: Vec<_> = surface.circles.iter().map(|(c, _)| *c).collect();
    assert_eq!(centres, vec![Vec2::new(100.0, 100.0), Vec2::new(300.0, 300.0)]);
}

#[test]
fn test_lone_circle_without_forces_stays_put() {
    let mut world = running_world(ConfigPatch::default().with_gravity(0.0).with_randomize(0.0));
    let key = world.spawn(Vec2::new(400.0, 300.0), ShapeKind::Circle);
    world.tick();
    assert_eq!(world.get(key).unwrap().position, Vec2::new(400.0, 300.0));
}

// ==================== Border Tests ====================

#[test]
fn test_bouncy_border_contains_lone_shape() {
    let mut world = running_world(
        ConfigPatch::default()
            .with_bouncy_border(true)
            .with_gravity(0.0)
            .with_randomize(80.0)
            .with_spawn_drift(0.5)
            .with_shape_size(30.0),
    );
    let key = world.spawn(Vec2::new(20.0, 580.0), ShapeKind::Square);

    for _ in 0..1000 {
        world.tick();
        let shape = world.get(key).unwrap();
        let half = shape.size() / 2.0;
        assert!(shape.position.x >= half - 1e-3 && shape.position.x <= 800.0 - half + 1e-3);
        assert!(shape.position.y >= half - 1e-3 && shape.position.y <= 600.0 - half + 1e-3);
    }
}

#[test]
fn test_bouncy_border_reverses_wallward_velocity() {
    // Drift stays below the speed limit, so velocity only changes at a wall
    let mut world = running_world(
        ConfigPatch::default()
            .with_bouncy_border(true)
            .with_gravity(0.0)
            .with_spawn_drift(2.0),
    );
    let key = world.spawn(Vec2::new(400.0, 300.0), ShapeKind::Circle);

    let mut previous = world.get(key).unwrap().velocity;
    let mut bounced = false;
    for _ in 0..5000 {
        let report = world.tick();
        let velocity = world.get(key).unwrap().velocity;
        if report.step.bounces > 0 {
            assert!(velocity.x == previous.x || velocity.x == -previous.x);
            assert!(velocity.y == previous.y || velocity.y == -previous.y);
            assert_ne!(velocity, previous);
            bounced = true;
            break;
        }
        assert_eq!(velocity, previous);
        previous = velocity;
    }
    assert!(bounced, "shape never reached a wall");
}

#[test]
fn test_off_screen_shape_removed_next_step() {
    let mut world = running_world(ConfigPatch::default().with_gravity(0.0));
    let inside = world.spawn(Vec2::new(400.0, 300.0), ShapeKind::Circle);
    // Margin for size 20 is 30
    let outside = world.spawn(Vec2::new(831.0, 300.0), ShapeKind::Circle);

    let report = world.tick();
    assert_eq!(report.step.removed, vec![outside]);
    assert!(world.get(outside).is_none());
    assert!(world.get(inside).is_some());
}

#[test]
fn test_many_off_screen_shapes_removed_together() {
    let mut world = running_world(ConfigPatch::default().with_gravity(0.0));
    for i in 0..10 {
        world.spawn(Vec2::new(-100.0 - i as f32 * 40.0, 300.0), ShapeKind::Square);
    }
    let keep = world.spawn(Vec2::new(400.0, 300.0), ShapeKind::Square);
    let report = world.tick();
    assert_eq!(report.step.removed.len(), 10);
    assert_eq!(world.shape_count(), 1);
    assert!(world.get(keep).is_some());
}

// ==================== Collision Tests ====================

#[test]
fn test_overlapping_spawn_pair_separates() {
    let mut world = running_world(ConfigPatch::default().with_gravity(0.0));
    let a = world.spawn(Vec2::new(400.0, 300.0), ShapeKind::Circle);
    let b = world.spawn(Vec2::new(406.0, 303.0), ShapeKind::Circle);
    world.tick();

    let pa = world.get(a).unwrap();
    let pb = world.get(b).unwrap();
    assert!(pa.position.distance(pb.position) >= (pa.size() + pb.size()) / 2.0 - 1e-3);
}

#[test]
fn test_overlapping_pair_stays_apart_under_gravity() {
    let mut world = running_world(ConfigPatch::default());
    let a = world.spawn(Vec2::new(400.0, 300.0), ShapeKind::Circle);
    let b = world.spawn(Vec2::new(406.0, 303.0), ShapeKind::Circle);

    for frame in 0..60 {
        world.tick();
        let pa = world.get(a).unwrap();
        let pb = world.get(b).unwrap();
        let contact = (pa.size() + pb.size()) / 2.0;
        let distance = pa.position.distance(pb.position);
        assert!(
            distance >= contact - 0.05,
            "frame {}: distance {} inside contact {}",
            frame,
            distance,
            contact
        );
    }
}

#[test]
fn test_default_gravity_pair_converges() {
    let mut world = running_world(ConfigPatch::default());
    let a = world.spawn(Vec2::new(300.0, 300.0), ShapeKind::Circle);
    let b = world.spawn(Vec2::new(500.0, 300.0), ShapeKind::Circle);
    let start = 200.0;
    for _ in 0..30 {
        world.tick();
    }
    let now = world.get(a).unwrap().position.distance(world.get(b).unwrap().position);
    assert!(now < start);
}

// ==================== Clear Tests ====================

#[test]
fn test_clear_empties_and_resets_defaults() {
    let mut world = running_world(
        ConfigPatch::default()
            .with_gravity(7.0)
            .with_randomize(60.0)
            .with_shape_size(45.0)
            .with_bouncy_border(true)
            .with_kind(ShapeKind::Triangle),
    );
    for i in 0..12 {
        world.spawn_at(50.0 + i as f32 * 20.0, 200.0);
    }

    world.clear();

    assert_eq!(world.shape_count(), 0);
    let config = world.config();
    assert_eq!(config.gravity_strength, DEFAULT_GRAVITY);
    assert_eq!(config.randomize_strength, DEFAULT_RANDOMIZE);
    assert_eq!(config.shape_size, DEFAULT_SHAPE_SIZE);
    assert!(!config.bouncy_border);
    assert_eq!(config.selected_kind, ShapeKind::Triangle);
    assert!(world.is_running());
}

#[test]
fn test_restart_command_pauses() {
    let mut world = running_world(ConfigPatch::default());
    world.spawn_at(100.0, 100.0);
    world.queue(Command::Restart);
    let report = world.tick();
    assert!(report.cleared);
    assert!(!world.is_running());
    assert_eq!(world.shape_count(), 0);
    assert!(report.step.removed.is_empty());
}
