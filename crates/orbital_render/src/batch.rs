//! Triangle batches for the canvas
//!
//! [`ShapeBatch`] is the [`Surface`] the world paints onto. Each call is
//! tessellated into triangles in canvas pixel space and appended in draw
//! order; [`crate::Canvas`] later replays the batch on the GPU with alpha
//! blending over the persistent canvas texture.

use bytemuck::{Pod, Zeroable};
use orbital_core::Surface;
use orbital_math::{Color, Vec2};

/// Fewest segments used for a disc
pub const MIN_CIRCLE_SEGMENTS: usize = 16;
/// Most segments used for a disc
pub const MAX_CIRCLE_SEGMENTS: usize = 96;

/// A canvas-space vertex with straight (non-premultiplied) RGBA color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    /// Position in canvas pixels, y down
    pub position: Vec2,
    /// RGBA color in [0, 1]
    pub color: [f32; 4],
}

impl ShapeVertex {
    /// Create a new vertex
    pub fn new(position: Vec2, color: Color) -> Self {
        Self {
            position,
            color: color.to_f32_array(),
        }
    }
}

/// Segments used to tessellate a disc of `radius` pixels
pub fn circle_segments(radius: f32) -> usize {
    ((radius * 1.5).ceil() as usize).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

/// Draw calls for one frame, tessellated and waiting for the GPU
#[derive(Clone, Debug)]
pub struct ShapeBatch {
    width: u32,
    height: u32,
    clear: Option<Color>,
    vertices: Vec<ShapeVertex>,
}

impl ShapeBatch {
    /// Create a batch for a canvas that starts opaque black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clear: Some(Color::BLACK),
            vertices: Vec::new(),
        }
    }

    /// Change the canvas size; the canvas is repainted with `background`
    pub fn resize(&mut self, width: u32, height: u32, background: Color) {
        self.width = width;
        self.height = height;
        self.full_clear(background);
    }

    /// Repaint the whole canvas opaque, dropping anything batched so far
    pub fn full_clear(&mut self, color: Color) {
        self.vertices.clear();
        self.clear = Some(color.with_alpha(u8::MAX));
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opaque color the canvas must be cleared to before the triangles
    pub fn pending_clear(&self) -> Option<Color> {
        self.clear
    }

    /// Triangles in draw order, three vertices each
    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    /// Nothing to draw and nothing to clear
    pub fn is_empty(&self) -> bool {
        self.clear.is_none() && self.vertices.is_empty()
    }

    /// Forget the batch once it has been drawn
    pub fn finish(&mut self) {
        self.clear = None;
        self.vertices.clear();
    }

    fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.vertices.extend([
            ShapeVertex::new(a, color),
            ShapeVertex::new(b, color),
            ShapeVertex::new(c, color),
        ]);
    }
}

impl Surface for ShapeBatch {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) {
        match color.a {
            0 => {}
            u8::MAX => self.full_clear(color),
            _ => {
                let (w, h) = (self.width as f32, self.height as f32);
                let corners = [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(0.0, h)];
                self.push_triangle(corners[0], corners[1], corners[2], color);
                self.push_triangle(corners[0], corners[2], corners[3], color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !(radius > 0.0 && radius.is_finite()) || !center.is_finite() {
            return;
        }

        let segments = circle_segments(radius);
        let step = std::f32::consts::TAU / segments as f32;
        let rim = |i: usize| center + Vec2::from_angle(i as f32 * step) * radius;
        for i in 0..segments {
            self.push_triangle(center, rim(i), rim(i + 1), color);
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 || !points.iter().all(|p| p.is_finite()) {
            return;
        }

        // Convex outlines only, so a fan from the first vertex covers it
        for pair in points[1..].windows(2) {
            self.push_triangle(points[0], pair[0], pair[1], color);
        }
    }
}
