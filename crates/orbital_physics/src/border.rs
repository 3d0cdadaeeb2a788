//! Canvas border policies: bounce or cull

use crate::body::Shape;
use orbital_math::Vec2;

/// Off-screen margin as a multiple of the shape size
pub const OFF_SCREEN_MARGIN_RATIO: f32 = 1.5;

/// Canvas extents in pixels; the origin is the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Create bounds for a `width` by `height` canvas
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Strictly inside the canvas (edges excluded)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > 0.0 && point.x < self.width && point.y > 0.0 && point.y < self.height
    }

    /// Centre of the canvas
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Keep a shape inside the canvas, reflecting wall-ward velocity
///
/// Returns `true` when a velocity component was reversed.
pub fn apply_bouncy_border(shape: &mut Shape, bounds: Bounds) -> bool {
    let half = shape.half_size();
    let bounced_x = bounce_axis(&mut shape.position.x, &mut shape.velocity.x, half, bounds.width);
    let bounced_y = bounce_axis(&mut shape.position.y, &mut shape.velocity.y, half, bounds.height);
    bounced_x || bounced_y
}

fn bounce_axis(position: &mut f32, velocity: &mut f32, half: f32, extent: f32) -> bool {
    // No room to move on this axis: pin to the middle
    if extent < half * 2.0 {
        *position = extent * 0.5;
        *velocity = 0.0;
        return false;
    }

    if *position - half < 0.0 {
        *position = half;
        if *velocity < 0.0 {
            *velocity = -*velocity;
            return true;
        }
    } else if *position + half > extent {
        *position = extent - half;
        if *velocity > 0.0 {
            *velocity = -*velocity;
            return true;
        }
    }
    false
}

/// Whether a shape has drifted far enough past any edge to be culled
pub fn is_off_screen(shape: &Shape, bounds: Bounds) -> bool {
    let margin = shape.size() * OFF_SCREEN_MARGIN_RATIO;
    let p = shape.position;
    p.x + margin < 0.0 || p.x - margin > bounds.width || p.y + margin < 0.0 || p.y - margin > bounds.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ShapeKind;

    fn square(x: f32, y: f32, vx: f32, vy: f32) -> Shape {
        Shape::new(ShapeKind::Square, Vec2::new(x, y), 20.0).with_velocity(Vec2::new(vx, vy))
    }

    #[test]
    fn test_inside_shape_untouched() {
        let mut shape = square(50.0, 50.0, 3.0, -2.0);
        assert!(!apply_bouncy_border(&mut shape, Bounds::new(100.0, 100.0)));
        assert_eq!(shape.position, Vec2::new(50.0, 50.0));
        assert_eq!(shape.velocity, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut shape = square(4.0, 50.0, -3.0, 1.0);
        assert!(apply_bouncy_border(&mut shape, Bounds::new(100.0, 100.0)));
        assert_eq!(shape.position.x, 10.0);
        assert_eq!(shape.velocity, Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_far_walls_bounce() {
        let mut shape = square(98.0, 95.0, 2.0, 4.0);
        assert!(apply_bouncy_border(&mut shape, Bounds::new(100.0, 100.0)));
        assert_eq!(shape.position, Vec2::new(90.0, 90.0));
        assert_eq!(shape.velocity, Vec2::new(-2.0, -4.0));
    }

    #[test]
    fn test_clamp_without_flip_when_leaving_wall() {
        // Already heading back inside: clamp but keep velocity
        let mut shape = square(5.0, 50.0, 1.5, 0.0);
        assert!(!apply_bouncy_border(&mut shape, Bounds::new(100.0, 100.0)));
        assert_eq!(shape.position.x, 10.0);
        assert_eq!(shape.velocity.x, 1.5);
    }

    #[test]
    fn test_narrow_canvas_pins_to_centre() {
        let mut shape = square(3.0, 50.0, 2.0, 0.0);
        apply_bouncy_border(&mut shape, Bounds::new(12.0, 100.0));
        assert_eq!(shape.position.x, 6.0);
        assert_eq!(shape.velocity.x, 0.0);
    }

    #[test]
    fn test_off_screen_margin() {
        let bounds = Bounds::new(200.0, 100.0);
        // Margin is 30 for a size-20 shape
        assert!(!is_off_screen(&square(-29.0, 50.0, 0.0, 0.0), bounds));
        assert!(is_off_screen(&square(-31.0, 50.0, 0.0, 0.0), bounds));
        assert!(is_off_screen(&square(231.0, 50.0, 0.0, 0.0), bounds));
        assert!(is_off_screen(&square(100.0, -31.0, 0.0, 0.0), bounds));
        assert!(is_off_screen(&square(100.0, 131.0, 0.0, 0.0), bounds));
        assert!(!is_off_screen(&square(100.0, 50.0, 0.0, 0.0), bounds));
    }

    #[test]
    fn test_bounds_contains_is_strict() {
        let bounds = Bounds::new(100.0, 50.0);
        assert!(bounds.contains(Vec2::new(1.0, 1.0)));
        assert!(!bounds.contains(Vec2::new(0.0, 10.0)));
        assert!(!bounds.contains(Vec2::new(100.0, 10.0)));
        assert!(!bounds.contains(Vec2::new(10.0, 50.0)));
        assert_eq!(bounds.center(), Vec2::new(50.0, 25.0));
    }
}
