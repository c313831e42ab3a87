//! # Noise Generator
//!
//! Seeded coherent noise for terrain shaping.
//!
//! Single-octave samples come from the `noise` crate's Perlin gradient noise,
//! whose permutation table is shuffled from the seed. The fractal variant sums
//! octaves of that noise at increasing frequency and decreasing amplitude
//! (fractional Brownian motion) and clamps the result to `[-1, 1]`.
//!
//! Everything here is a pure function of its inputs and the seed, which is
//! what makes cached chunks safe to drop and regenerate.

use std::fmt;

use noise::{NoiseFn, Perlin};

use crate::config::FbmConfig;

/// Deterministic terrain noise source.
#[derive(Clone)]
pub struct NoiseGenerator {
    seed: u32,
    perlin: Perlin,
    fbm: FbmConfig,
}

impl fmt::Debug for NoiseGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseGenerator")
            .field("seed", &self.seed)
            .field("fbm", &self.fbm)
            .finish()
    }
}

impl NoiseGenerator {
    /// Creates a generator whose permutation table is derived from `seed`.
    pub fn new(seed: u32, fbm: FbmConfig) -> Self {
        NoiseGenerator {
            seed,
            perlin: Perlin::new(seed),
            fbm,
        }
    }

    /// The seed the permutation table was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Octave parameters used by `fbm`.
    pub fn fbm_config(&self) -> &FbmConfig {
        &self.fbm
    }

    /// Samples one octave of gradient noise, clamped to `[-1, 1]`.
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Samples fractal noise at a 2D point using the configured octave parameters.
    ///
    /// The 2D point is lifted onto the plane `z = fbm.z_plane`, scaled along with
    /// x and y at every octave.
    pub fn fbm(&self, x: f64, y: f64) -> f64 {
        self.fbm_with(
            x,
            y,
            self.fbm.octaves,
            self.fbm.lacunarity,
            self.fbm.gain,
        )
    }

    /// Samples fractal noise with explicit octave parameters.
    ///
    /// # Arguments
    /// * `octaves` - Number of layers summed
    /// * `lacunarity` - Frequency multiplier per octave (2.0 gives the classic look)
    /// * `gain` - Amplitude multiplier per octave
    ///
    /// # Returns
    /// The octave sum clamped to `[-1, 1]`.
    pub fn fbm_with(&self, x: f64, y: f64, octaves: u32, lacunarity: f64, gain: f64) -> f64 {
        let z = self.fbm.z_plane;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut sum = 0.0;

        for _ in 0..octaves {
            sum += amplitude * self.noise(x * frequency, y * frequency, z * frequency);
            frequency *= lacunarity;
            amplitude *= gain;
        }

        sum.clamp(-1.0, 1.0)
    }
}

/// Maps a sample from `[-1, 1]` onto `[0, 1]`.
pub fn normalize(sample: f64) -> f64 {
    (sample + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u32) -> NoiseGenerator {
        NoiseGenerator::new(seed, FbmConfig::default())
    }

    #[test]
    fn test_same_seed_same_values() {
        let a = generator(55);
        let b = generator(55);
        for i in 0..200 {
            let x = i as f64 * 0.173 - 12.0;
            let y = i as f64 * 0.091 + 3.0;
            assert_eq!(a.fbm(x, y).to_bits(), b.fbm(x, y).to_bits());
            assert_eq!(a.noise(x, y, 0.5).to_bits(), b.noise(x, y, 0.5).to_bits());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generator(1);
        let b = generator(2);
        let differs = (0..100).any(|i| {
            let x = i as f64 * 0.37 + 0.11;
            a.fbm(x, x * 0.5) != b.fbm(x, x * 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn test_outputs_stay_in_range() {
        let noise = generator(9);
        for i in -300..300 {
            let x = i as f64 * 0.0731;
            let y = i as f64 * -0.049;
            let single = noise.noise(x, y, 1.0);
            let fractal = noise.fbm(x, y);
            assert!((-1.0..=1.0).contains(&single), "{single}");
            assert!((-1.0..=1.0).contains(&fractal), "{fractal}");
            assert!((0.0..=1.0).contains(&normalize(fractal)));
        }
    }

    #[test]
    fn test_single_octave_fbm_is_plain_noise() {
        let noise = generator(3);
        let z = noise.fbm_config().z_plane;
        for i in 0..50 {
            let x = i as f64 * 0.21;
            assert_eq!(noise.fbm_with(x, -x, 1, 2.0, 0.5), noise.noise(x, -x, z));
        }
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let noise = generator(3);
        assert_eq!(noise.fbm_with(0.3, 0.7, 0, 2.0, 0.5), 0.0);
    }

    #[test]
    fn test_normalize_endpoints() {
        assert_eq!(normalize(-1.0), 0.0);
        assert_eq!(normalize(0.0), 0.5);
        assert_eq!(normalize(1.0), 1.0);
    }
}
