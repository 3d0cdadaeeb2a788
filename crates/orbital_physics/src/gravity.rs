//! Pairwise gravitational attraction
//!
//! The model is deliberately toy-like: force falls off with the square of a
//! floored centre distance, and turns into a weak repulsion once two shapes
//! overlap so that clusters do not collapse onto a single point.

use crate::body::Shape;
use orbital_math::Vec2;
use serde::{Deserialize, Serialize};

/// Fraction of the summed sizes below which centre distance is not allowed to fall
pub const DISTANCE_FLOOR_RATIO: f32 = 0.25;
/// Scale applied to the force (and its sign flipped) when two shapes overlap
pub const OVERLAP_REPULSION: f32 = 0.5;
/// Centre distances below this are treated as coincident and skipped
pub const COINCIDENCE_EPSILON: f32 = 1e-4;

/// How the pull between two shapes is applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityMode {
    /// Each shape accelerates itself toward every other shape when it is
    /// updated; the other shape is left alone until its own turn
    #[default]
    Asymmetric,
    /// Each pair is processed once per frame and both shapes receive equal and
    /// opposite impulses (momentum conserving)
    Reciprocal,
}

impl GravityMode {
    /// Whether the other shape also receives the opposite impulse
    #[inline]
    pub fn is_reciprocal(self) -> bool {
        matches!(self, GravityMode::Reciprocal)
    }
}

/// Force that `other` exerts on `body`, pointing from `body` toward `other`
///
/// Returns `None` when the two centres coincide, since no direction exists.
/// Overlapping shapes get a reversed force of half strength.
pub fn gravitational_force(body: &Shape, other: &Shape, strength: f32) -> Option<Vec2> {
    let delta = other.position - body.position;
    let dist = delta.length();
    // Also rejects NaN distances
    if !(dist >= COINCIDENCE_EPSILON) {
        return None;
    }

    let floor = (body.size() + other.size()) * DISTANCE_FLOOR_RATIO;
    let d = dist.max(floor);

    let mut magnitude = strength * body.mass() * other.mass() / (d * d);
    if d < body.contact_distance(other) {
        magnitude *= -OVERLAP_REPULSION;
    }

    Some(Vec2::from_angle(delta.angle()) * magnitude)
}
