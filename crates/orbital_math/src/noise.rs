//! Coherent value noise
//!
//! A smooth pseudo-random field over 3D space, used to drive jitter that
//! varies continuously with position and time instead of per-frame white
//! noise. Several octaves are summed (fractal Brownian motion) and the result
//! is normalized to `[0, 1]`, centred around `0.5`.

/// Integer hash with good avalanche behaviour (lowbias32 variant)
#[inline]
fn hash(n: u32) -> u32 {
    let mut x = n;
    x ^= x >> 17;
    x = x.wrapping_mul(0xed5a_d4bb);
    x ^= x >> 11;
    x = x.wrapping_mul(0xac4c_1b51);
    x ^= x >> 15;
    x = x.wrapping_mul(0x3184_8bab);
    x ^= x >> 14;
    x
}

#[inline]
fn hash3(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    hash((x as u32).wrapping_add(hash((y as u32).wrapping_add(hash((z as u32) ^ seed)))))
}

/// Smoothstep fade curve for lattice interpolation
#[inline]
fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Seeded fractal value-noise field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseField {
    seed: u32,
    octaves: u32,
    falloff: f32,
}

impl NoiseField {
    /// Default number of summed octaves
    pub const DEFAULT_OCTAVES: u32 = 4;
    /// Default amplitude ratio between successive octaves
    pub const DEFAULT_FALLOFF: f32 = 0.5;

    /// Create a field with the default octave count and falloff
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            octaves: Self::DEFAULT_OCTAVES,
            falloff: Self::DEFAULT_FALLOFF,
        }
    }

    /// Set the number of octaves (at least one)
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    /// Set the amplitude falloff between octaves, clamped to (0, 1]
    pub fn with_falloff(mut self, falloff: f32) -> Self {
        self.falloff = falloff.clamp(0.01, 1.0);
        self
    }

    /// Seed of this field
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field; the result lies in `[0, 1]`
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut amplitude_sum = 0.0;
        let mut frequency = 1.0;

        for octave in 0..self.octaves {
            let seed = self.seed.wrapping_add(octave.wrapping_mul(0x9e37_79b9));
            total += amplitude * self.lattice(x * frequency, y * frequency, z * frequency, seed);
            amplitude_sum += amplitude;
            amplitude *= self.falloff;
            frequency *= 2.0;
        }

        total / amplitude_sum
    }

    /// Single-octave trilinear value noise in `[0, 1]`
    fn lattice(&self, x: f32, y: f32, z: f32, seed: u32) -> f32 {
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let (xi, yi, zi) = (xf as i32, yf as i32, zf as i32);
        let (tx, ty, tz) = (fade(x - xf), fade(y - yf), fade(z - zf));

        let corner = |dx: i32, dy: i32, dz: i32| -> f32 {
            hash3(xi.wrapping_add(dx), yi.wrapping_add(dy), zi.wrapping_add(dz), seed) as f32
                / u32::MAX as f32
        };

        let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), tx);
        let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), tx);
        let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), tx);
        let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), tx);

        let y0 = lerp(x00, x10, ty);
        let y1 = lerp(x01, x11, ty);

        lerp(y0, y1, tz)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(0)
    }
}
