//! The shape body simulated by the physics world

use crate::kind::{Outline, ShapeKind};
use orbital_math::{Color, Vec2};
use slotmap::new_key_type;

// Define generational key type for shapes
new_key_type! {
    /// Key to a shape in the physics world
    ///
    /// Generational, so a key held by the host after its shape was evicted or
    /// culled resolves to `None` instead of aliasing a newer shape.
    pub struct ShapeKey;
}

/// Divides the geometric area to get mass
pub const MASS_DIVISOR: f32 = 250.0;
/// Lightest possible shape
pub const MIN_MASS: f32 = 0.5;
/// Heaviest possible shape
pub const MAX_MASS: f32 = 50.0;
/// Smallest accepted linear size; anything smaller (or non-finite) is raised to this
pub const MIN_SHAPE_SIZE: f32 = 1.0;

/// Mass of a shape with the given kind and linear size
///
/// Pure function of its inputs and always within `[MIN_MASS, MAX_MASS]`.
#[inline]
pub fn mass_for(kind: ShapeKind, size: f32) -> f32 {
    (kind.area(size) / MASS_DIVISOR).clamp(MIN_MASS, MAX_MASS)
}

/// A rigid 2D shape with position, velocity and cosmetic spin
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Geometric kind (fixed at creation)
    pub kind: ShapeKind,
    /// Centre position in canvas pixels
    pub position: Vec2,
    /// Velocity (pixels per frame)
    pub velocity: Vec2,
    /// Rotation angle (radians)
    pub rotation: f32,
    /// Rotation speed (radians per frame)
    pub rotation_speed: f32,
    /// Fill color
    pub color: Color,
    size: f32,
    mass: f32,
}

impl Shape {
    /// Create a shape at rest with no rotation
    pub fn new(kind: ShapeKind, position: Vec2, size: f32) -> Self {
        let size = if size.is_finite() {
            size.max(MIN_SHAPE_SIZE)
        } else {
            MIN_SHAPE_SIZE
        };

        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            color: Color::WHITE,
            size,
            mass: mass_for(kind, size),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initial rotation angle
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the rotation speed
    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    /// Set the fill color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Linear dimension (diameter / side length)
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Mass derived from kind and size at creation
    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Half the linear dimension
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    /// Current speed
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Centre distance at which this shape and `other` start touching
    #[inline]
    pub fn contact_distance(&self, other: &Shape) -> f32 {
        (self.size + other.size) * 0.5
    }

    /// Outline in local space (before rotation and translation)
    pub fn local_outline(&self) -> Outline {
        self.kind.outline(self.size)
    }

    /// Transform a local-space point to canvas space
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + local.rotated(self.rotation)
    }

    /// Apply a velocity change scaled by inverse mass
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse * (1.0 / self.mass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shape_at_rest() {
        let shape = Shape::new(ShapeKind::Circle, Vec2::new(100.0, 100.0), 20.0);
        assert_eq!(shape.position, Vec2::new(100.0, 100.0));
        assert_eq!(shape.velocity, Vec2::ZERO);
        assert_eq!(shape.rotation, 0.0);
        assert_eq!(shape.size(), 20.0);
        assert_eq!(shape.color, Color::WHITE);
    }

    #[test]
    fn test_mass_positive_and_deterministic() {
        for kind in ShapeKind::ALL {
            for size in [0.0, 1.0, 5.0, 20.0, 80.0, 500.0] {
                let a = Shape::new(kind, Vec2::ZERO, size);
                let b = Shape::new(kind, Vec2::new(50.0, 50.0), size);
                assert!(a.mass() > 0.0);
                assert_eq!(a.mass(), b.mass());
                assert!((MIN_MASS..=MAX_MASS).contains(&a.mass()));
            }
        }
    }

    #[test]
    fn test_mass_matches_area_formula() {
        // Size-20 circle: π·10² / 250 ≈ 1.2566
        let circle = mass_for(ShapeKind::Circle, 20.0);
        assert!((circle - 1.2566).abs() < 0.001);
        assert_eq!(mass_for(ShapeKind::Square, 20.0), 1.6);
        // Small shapes hit the floor, huge ones the ceiling
        assert_eq!(mass_for(ShapeKind::Triangle, 5.0), MIN_MASS);
        assert_eq!(mass_for(ShapeKind::Square, 1000.0), MAX_MASS);
    }

    #[test]
    fn test_invalid_size_is_raised() {
        assert_eq!(Shape::new(ShapeKind::Square, Vec2::ZERO, -4.0).size(), MIN_SHAPE_SIZE);
        assert_eq!(Shape::new(ShapeKind::Square, Vec2::ZERO, f32::NAN).size(), MIN_SHAPE_SIZE);
    }

    #[test]
    fn test_builder_methods() {
        let shape = Shape::new(ShapeKind::Triangle, Vec2::ZERO, 10.0)
            .with_velocity(Vec2::new(1.0, -1.0))
            .with_rotation(0.5)
            .with_rotation_speed(0.01)
            .with_color(Color::rgb(200, 160, 255));

        assert_eq!(shape.velocity, Vec2::new(1.0, -1.0));
        assert_eq!(shape.rotation, 0.5);
        assert_eq!(shape.rotation_speed, 0.01);
        assert_eq!(shape.color, Color::rgb(200, 160, 255));
    }

    #[test]
    fn test_contact_distance() {
        let a = Shape::new(ShapeKind::Circle, Vec2::ZERO, 20.0);
        let b = Shape::new(ShapeKind::Square, Vec2::ZERO, 30.0);
        assert_eq!(a.contact_distance(&b), 25.0);
    }

    #[test]
    fn test_local_to_world_rotates_then_translates() {
        let shape = Shape::new(ShapeKind::Square, Vec2::new(10.0, 10.0), 4.0)
            .with_rotation(std::f32::consts::FRAC_PI_2);
        let p = shape.local_to_world(Vec2::new(2.0, 0.0));
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_apply_impulse_scales_by_mass() {
        let mut shape = Shape::new(ShapeKind::Square, Vec2::ZERO, 20.0); // mass 1.6
        shape.apply_impulse(Vec2::new(1.6, 0.0));
        assert!((shape.velocity.x - 1.0).abs() < 1e-6);
    }
}
