//! Drawing contract between the world and whatever paints pixels

use orbital_math::{Color, Vec2};
use orbital_physics::{Outline, Shape};

/// A 2D drawing target in canvas pixel coordinates
///
/// Implementations blend with source-over alpha and keep their contents
/// between frames, which is what makes the translucent background wash
/// leave trails.
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (u32, u32);

    /// Blend `color` over the whole surface
    fn fill(&mut self, color: Color);

    /// Fill a disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill a convex polygon given in winding order
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
}

/// Draw one shape in its local frame: rotated by its rotation, then moved to its position
pub fn draw_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape) {
    match shape.local_outline() {
        // Rotation does not change a disc
        Outline::Circle { radius } => surface.fill_circle(shape.position, radius, shape.color),
        Outline::Polygon(points) => {
            let placed: Vec<Vec2> = points.into_iter().map(|p| shape.local_to_world(p)).collect();
            surface.fill_polygon(&placed, shape.color);
        }
    }
}
