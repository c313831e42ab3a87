//! # Terrain Type Module
//!
//! This module defines the closed set of surface materials a terrain cell can have.
//! The discriminant of each variant doubles as the index into a renderer's
//! material table, so the order of variants is part of the public contract.

use std::fmt;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::TerrainTypeSize;

/// Number of terrain types; every `TerrainType as usize` is below this.
pub const TERRAIN_TYPE_COUNT: usize = 3;

/// Enumerates the surface materials of the terrain.
///
/// Variants are ordered by the normalized noise band they are generated from:
/// low ground is grass, mid elevations dirt, peaks snow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
pub enum TerrainType {
    /// Lowland grass.
    GRASS,
    /// Exposed dirt on slopes.
    DIRT,
    /// Snow caps on the highest cells.
    SNOW,
}

impl TerrainType {
    /// Every terrain type, in material-table order.
    pub const ALL: [TerrainType; TERRAIN_TYPE_COUNT] =
        [TerrainType::GRASS, TerrainType::DIRT, TerrainType::SNOW];

    /// Converts a stored index back into a `TerrainType`.
    ///
    /// # Returns
    /// `None` if the index is not below `TERRAIN_TYPE_COUNT`.
    pub fn from_index(index: TerrainTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(index)
    }

    /// Maps a normalized noise sample in `[0, 1]` onto a terrain type.
    ///
    /// The unit interval is split into `TERRAIN_TYPE_COUNT` equal bands; a sample
    /// of exactly `1.0` (or anything out of range) is clamped into the valid set.
    pub fn from_normalized(sample: f32) -> Self {
        let band = (sample * TERRAIN_TYPE_COUNT as f32).floor();
        let index = band.clamp(0.0, (TERRAIN_TYPE_COUNT - 1) as f32) as TerrainTypeSize;
        Self::from_index(index).unwrap_or(TerrainType::GRASS)
    }

    /// Index of this type in the material table.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerrainType::GRASS => "grass",
            TerrainType::DIRT => "dirt",
            TerrainType::SNOW => "snow",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for terrain_type in TerrainType::ALL {
            let index = terrain_type.index() as TerrainTypeSize;
            assert_eq!(TerrainType::from_index(index), Some(terrain_type));
        }
        assert_eq!(TerrainType::from_index(TERRAIN_TYPE_COUNT as TerrainTypeSize), None);
    }

    #[test]
    fn test_normalized_bands() {
        assert_eq!(TerrainType::from_normalized(0.0), TerrainType::GRASS);
        assert_eq!(TerrainType::from_normalized(0.32), TerrainType::GRASS);
        assert_eq!(TerrainType::from_normalized(0.5), TerrainType::DIRT);
        assert_eq!(TerrainType::from_normalized(0.9), TerrainType::SNOW);
        assert_eq!(TerrainType::from_normalized(1.0), TerrainType::SNOW);
    }

    #[test]
    fn test_out_of_range_samples_clamp() {
        assert_eq!(TerrainType::from_normalized(-0.4), TerrainType::GRASS);
        assert_eq!(TerrainType::from_normalized(7.0), TerrainType::SNOW);
        assert_eq!(TerrainType::from_normalized(f32::NAN), TerrainType::GRASS);
    }
}
