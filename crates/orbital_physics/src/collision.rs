//! Overlap detection and impulse-based collision response
//!
//! Shapes collide as discs of diameter `size`, whatever their drawn kind.

use crate::body::Shape;
use crate::gravity::COINCIDENCE_EPSILON;
use orbital_math::Vec2;

/// Contact between two overlapping shapes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the other shape toward this one
    pub normal: Vec2,
    /// Centre distance at detection time
    pub distance: f32,
    /// Overlap depth (contact distance minus centre distance)
    pub penetration: f32,
}

/// Detect an overlap between `body` and `other`
///
/// Returns `None` when the shapes are apart or their centres coincide.
pub fn detect(body: &Shape, other: &Shape) -> Option<Contact> {
    let delta = body.position - other.position;
    let distance = delta.length();
    let contact_distance = body.contact_distance(other);

    if distance > COINCIDENCE_EPSILON && distance < contact_distance {
        Some(Contact {
            normal: delta / distance,
            distance,
            penetration: contact_distance - distance,
        })
    } else {
        None
    }
}

/// Push both shapes apart by half the overlap each
pub fn separate(body: &mut Shape, other: &mut Shape, contact: &Contact) {
    let push = contact.normal * (contact.penetration * 0.5);
    body.position += push;
    other.position -= push;
}

/// Apply the restitution impulse along the contact normal
///
/// Returns `false` (and changes nothing) when the shapes are already
/// separating.
pub fn resolve_impulse(body: &mut Shape, other: &mut Shape, contact: &Contact, restitution: f32) -> bool {
    let velocity_along_normal = (body.velocity - other.velocity).dot(contact.normal);
    if !(velocity_along_normal < 0.0) {
        return false;
    }

    let inverse_mass_sum = 1.0 / body.mass() + 1.0 / other.mass();
    let j = -(1.0 + restitution) * velocity_along_normal / inverse_mass_sum;
    let impulse = contact.normal * j;

    body.apply_impulse(impulse);
    other.apply_impulse(-impulse);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ShapeKind;

    fn circle(x: f32, vx: f32) -> Shape {
        Shape::new(ShapeKind::Circle, Vec2::new(x, 100.0), 20.0).with_velocity(Vec2::new(vx, 0.0))
    }

    #[test]
    fn test_detect_overlap() {
        let a = circle(100.0, 0.0);
        let b = circle(115.0, 0.0);
        let contact = detect(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(contact.distance, 15.0);
        assert_eq!(contact.penetration, 5.0);
    }

    #[test]
    fn test_detect_apart_or_touching() {
        assert!(detect(&circle(100.0, 0.0), &circle(130.0, 0.0)).is_none());
        // Exactly touching is not an overlap
        assert!(detect(&circle(100.0, 0.0), &circle(120.0, 0.0)).is_none());
    }

    #[test]
    fn test_detect_coincident_skipped() {
        assert!(detect(&circle(100.0, 0.0), &circle(100.0, 0.0)).is_none());
    }

    #[test]
    fn test_separate_resolves_overlap() {
        let mut a = circle(100.0, 0.0);
        let mut b = circle(112.0, 0.0);
        let contact = detect(&a, &b).unwrap();
        separate(&mut a, &mut b, &contact);
        assert!((a.position.distance(b.position) - 20.0).abs() < 1e-4);
        assert_eq!(a.position.x, 96.0);
        assert_eq!(b.position.x, 116.0);
    }

    #[test]
    fn test_equal_mass_elastic_swaps_velocities() {
        let mut a = circle(100.0, 1.0);
        let mut b = circle(115.0, -1.0);
        let contact = detect(&a, &b).unwrap();
        assert!(resolve_impulse(&mut a, &mut b, &contact, 1.0));
        assert!((a.velocity.x + 1.0).abs() < 1e-5);
        assert!((b.velocity.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_restitution_scales_exit_speed() {
        let mut a = circle(100.0, 1.0);
        let mut b = circle(115.0, -1.0);
        let contact = detect(&a, &b).unwrap();
        resolve_impulse(&mut a, &mut b, &contact, 0.85);
        assert!((a.velocity.x + 0.85).abs() < 1e-5);
        assert!((b.velocity.x - 0.85).abs() < 1e-5);
    }

    #[test]
    fn test_separating_pair_untouched() {
        let mut a = circle(100.0, -1.0);
        let mut b = circle(115.0, 1.0);
        let contact = detect(&a, &b).unwrap();
        assert!(!resolve_impulse(&mut a, &mut b, &contact, 0.85));
        assert_eq!(a.velocity.x, -1.0);
        assert_eq!(b.velocity.x, 1.0);
    }

    #[test]
    fn test_momentum_conserved() {
        let mut a = Shape::new(ShapeKind::Square, Vec2::new(0.0, 0.0), 40.0)
            .with_velocity(Vec2::new(2.0, 0.5));
        let mut b = Shape::new(ShapeKind::Circle, Vec2::new(25.0, 10.0), 20.0)
            .with_velocity(Vec2::new(-1.0, 0.0));
        let before = a.velocity * a.mass() + b.velocity * b.mass();

        let contact = detect(&a, &b).unwrap();
        assert!(resolve_impulse(&mut a, &mut b, &contact, 0.85));

        let after = a.velocity * a.mass() + b.velocity * b.mass();
        assert!((before - after).length() < 1e-4);
    }
}
