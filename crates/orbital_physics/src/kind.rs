//! Shape kinds and their per-kind geometry table
//!
//! Each [`ShapeKind`] maps to a [`KindProfile`] holding its area factor (used
//! for mass) and its outline generator (used for drawing). Both derive from
//! the same linear `size`, so the drawn area always matches the mass.

use orbital_math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

const SQRT_3: f32 = 1.732_050_8;

/// The closed set of spawnable shapes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
    Triangle,
}

/// Local-space outline of a shape, centred on the origin before rotation
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    /// A disc of the given radius
    Circle { radius: f32 },
    /// A convex polygon, vertices in winding order
    Polygon(Vec<Vec2>),
}

/// Per-kind table entry
pub struct KindProfile {
    /// Lowercase display name
    pub name: &'static str,
    /// Area divided by `size²`
    pub area_factor: f32,
    /// Builds the local outline for a given `size`
    pub outline: fn(f32) -> Outline,
}

fn circle_outline(size: f32) -> Outline {
    Outline::Circle { radius: size * 0.5 }
}

fn square_outline(size: f32) -> Outline {
    let h = size * 0.5;
    Outline::Polygon(vec![
        Vec2::new(-h, -h),
        Vec2::new(h, -h),
        Vec2::new(h, h),
        Vec2::new(-h, h),
    ])
}

/// Equilateral triangle of side `size`, centroid at the origin, one vertex up
/// (negative y, since canvas y grows downward)
fn triangle_outline(size: f32) -> Outline {
    let r = size / SQRT_3;
    let half_side = size * 0.5;
    Outline::Polygon(vec![
        Vec2::new(0.0, -r),
        Vec2::new(half_side, r * 0.5),
        Vec2::new(-half_side, r * 0.5),
    ])
}

static PROFILES: [KindProfile; 3] = [
    KindProfile {
        name: "circle",
        area_factor: std::f32::consts::PI / 4.0,
        outline: circle_outline,
    },
    KindProfile {
        name: "square",
        area_factor: 1.0,
        outline: square_outline,
    },
    KindProfile {
        name: "triangle",
        area_factor: SQRT_3 / 4.0,
        outline: triangle_outline,
    },
];

impl ShapeKind {
    /// All kinds, in selector order
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    /// Table entry for this kind
    #[inline]
    pub fn profile(self) -> &'static KindProfile {
        match self {
            ShapeKind::Circle => &PROFILES[0],
            ShapeKind::Square => &PROFILES[1],
            ShapeKind::Triangle => &PROFILES[2],
        }
    }

    /// Geometric area for a shape of linear dimension `size`
    #[inline]
    pub fn area(self, size: f32) -> f32 {
        self.profile().area_factor * size * size
    }

    /// Local outline for a shape of linear dimension `size`
    #[inline]
    pub fn outline(self, size: f32) -> Outline {
        (self.profile().outline)(size)
    }

    /// Lowercase display name
    #[inline]
    pub fn name(self) -> &'static str {
        self.profile().name
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| format!("Unknown shape kind: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shoelace area of a polygon
    fn polygon_area(points: &[Vec2]) -> f32 {
        let n = points.len();
        let twice: f32 = (0..n)
            .map(|i| {
                let a = points[i];
                let b = points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() * 0.5
    }

    #[test]
    fn test_area_formulas() {
        let size = 20.0;
        assert!((ShapeKind::Circle.area(size) - std::f32::consts::PI * 100.0).abs() < 0.01);
        assert_eq!(ShapeKind::Square.area(size), 400.0);
        assert!((ShapeKind::Triangle.area(size) - 173.205).abs() < 0.01);
    }

    #[test]
    fn test_polygon_outlines_match_area() {
        for kind in [ShapeKind::Square, ShapeKind::Triangle] {
            match kind.outline(30.0) {
                Outline::Polygon(points) => {
                    let drawn = polygon_area(&points);
                    assert!(
                        (drawn - kind.area(30.0)).abs() < 0.05,
                        "{} drawn area {} != {}",
                        kind,
                        drawn,
                        kind.area(30.0)
                    );
                }
                Outline::Circle { .. } => panic!("Expected polygon for {}", kind),
            }
        }
    }

    #[test]
    fn test_circle_outline_radius() {
        assert_eq!(ShapeKind::Circle.outline(20.0), Outline::Circle { radius: 10.0 });
    }

    #[test]
    fn test_triangle_centred_with_vertex_up() {
        let Outline::Polygon(points) = ShapeKind::Triangle.outline(12.0) else {
            panic!("Expected polygon");
        };
        assert_eq!(points.len(), 3);
        let centroid = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p) / 3.0;
        assert!(centroid.length() < 1e-4);
        // Apex is the only vertex above the centre
        assert!(points[0].y < 0.0 && points[0].x == 0.0);
        assert!(points[1].y > 0.0 && points[2].y > 0.0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Square".parse::<ShapeKind>().unwrap(), ShapeKind::Square);
        assert_eq!(" triangle ".parse::<ShapeKind>().unwrap(), ShapeKind::Triangle);
        assert!("hexagon".parse::<ShapeKind>().is_err());
        assert_eq!(ShapeKind::Circle.to_string(), "circle");
    }

    #[test]
    fn test_profiles_are_shared_statics() {
        for kind in ShapeKind::ALL {
            let a: &'static KindProfile = kind.profile();
            assert!(std::ptr::eq(a, kind.profile()));
            assert_eq!(a.name, kind.name());
        }
    }

    #[test]
    fn test_default_is_circle() {
        assert_eq!(ShapeKind::default(), ShapeKind::Circle);
    }
}
