//! # Configuration Module
//!
//! World generation parameters, loadable from JSON.
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes:
//!
//! ```json
//! { "seed": 55, "scale": 1.0, "fbm": { "octaves": 4 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Largest accepted `view_radius`, in chunks.
pub const MAX_VIEW_RADIUS: i32 = 32;

/// Parameters of the fractal noise sum used for terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmConfig {
    /// Number of noise layers summed.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub gain: f64,
    /// Fixed third coordinate the 2D fractal is sliced at.
    pub z_plane: f64,
}

impl Default for FbmConfig {
    fn default() -> Self {
        FbmConfig {
            octaves: 6,
            lacunarity: 2.0,
            gain: 0.5,
            z_plane: 1.0,
        }
    }
}

/// Everything needed to (re)create a world.
///
/// Two worlds built from equal configs generate identical terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the noise permutation table.
    pub seed: u32,
    /// Noise-space distance covered by one chunk.
    pub scale: f32,
    /// Octave parameters of the terrain noise.
    pub fbm: FbmConfig,
    /// Fraction of the maximum elevation actually used by terrain.
    pub height_damping: f32,
    /// Radius, in chunks, of the neighbourhood returned by `World::chunks_around`.
    pub view_radius: i32,
    /// Upper bound on cached chunks. `None` keeps every chunk for the session.
    pub max_chunks: Option<usize>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 1,
            scale: 1.0,
            fbm: FbmConfig::default(),
            height_damping: 0.6,
            view_radius: 1,
            max_chunks: None,
        }
    }
}

impl WorldConfig {
    /// Default configuration with the given seed and scale.
    pub fn with_seed(seed: u32, scale: f32) -> Self {
        WorldConfig {
            seed,
            scale,
            ..Default::default()
        }
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, WorldError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WorldError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of chunks in the view neighbourhood, `(2r + 1)²`.
    pub fn view_chunk_count(&self) -> usize {
        let side = 2 * self.view_radius.max(0) as u64 + 1;
        usize::try_from(side * side).unwrap_or(usize::MAX)
    }

    /// Checks that every value is usable for generation and lookup.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "scale must be a positive finite number, got {}",
                self.scale
            )));
        }
        if self.fbm.octaves == 0 {
            return Err(WorldError::InvalidConfig(
                "fbm.octaves must be at least 1".to_string(),
            ));
        }
        if !self.fbm.lacunarity.is_finite()
            || !self.fbm.gain.is_finite()
            || !self.fbm.z_plane.is_finite()
        {
            return Err(WorldError::InvalidConfig(
                "fbm parameters must be finite".to_string(),
            ));
        }
        if !self.height_damping.is_finite() || !(0.0..=1.0).contains(&self.height_damping) {
            return Err(WorldError::InvalidConfig(format!(
                "height_damping must be within [0, 1], got {}",
                self.height_damping
            )));
        }
        if !(0..=MAX_VIEW_RADIUS).contains(&self.view_radius) {
            return Err(WorldError::InvalidConfig(format!(
                "view_radius must be within [0, {MAX_VIEW_RADIUS}], got {}",
                self.view_radius
            )));
        }
        if let Some(max_chunks) = self.max_chunks {
            // A collision query can touch four chunks and a view query the whole
            // neighbourhood; both must fit at once.
            let required = self.view_chunk_count().max(4);
            if max_chunks < required {
                return Err(WorldError::InvalidConfig(format!(
                    "max_chunks must be at least {required}, got {max_chunks}"
                )));
            }
        }
        Ok(())
    }
}
