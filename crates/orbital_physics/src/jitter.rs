//! Noise-driven velocity perturbation

use orbital_math::{NoiseField, Vec2};

/// Scale from canvas pixels to noise coordinates
pub const NOISE_SPATIAL_SCALE: f32 = 0.01;
/// Scale from frame count to the noise time axis
pub const NOISE_TIME_SCALE: f32 = 0.01;
/// Offset between the x and y samples so the two axes are uncorrelated
pub const NOISE_AXIS_OFFSET: f32 = 100.0;
/// Converts the user-facing randomize strength into a per-frame velocity change
pub const RANDOMIZE_SCALE: f32 = 0.001;

/// Velocity nudge for a shape at `position` on the given frame
///
/// Varies smoothly in space and time. Zero when `randomize` is not positive.
pub fn jitter(noise: &NoiseField, position: Vec2, frame: u64, randomize: f32) -> Vec2 {
    if !(randomize > 0.0) {
        return Vec2::ZERO;
    }

    let x = position.x * NOISE_SPATIAL_SCALE;
    let y = position.y * NOISE_SPATIAL_SCALE;
    let t = frame as f32 * NOISE_TIME_SCALE;

    let dx = noise.sample(x, y, t) - 0.5;
    let dy = noise.sample(x + NOISE_AXIS_OFFSET, y + NOISE_AXIS_OFFSET, t) - 0.5;

    Vec2::new(dx, dy) * (randomize * RANDOMIZE_SCALE)
}
