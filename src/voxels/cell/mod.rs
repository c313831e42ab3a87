//! # Cell Module
//!
//! This module provides the terrain cell, the atomic unit of the world.
//! A cell is one column of the heightfield: a surface material and the
//! elevation its top cube sits at.

use serde::{Deserialize, Serialize};
use terrain_type::TerrainType;

pub mod terrain_type;

/// The underlying integer type used to store terrain types in a cell.
pub type TerrainTypeSize = u8;

/// Upper bound of generated cell heights, in world units.
pub const MAX_ELEVATION: f32 = 10.0;

/// One terrain column of a chunk.
///
/// Cells are written once by the chunk generator and never modified.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// The surface material, stored compactly as its material-table index.
    pub terrain_type: TerrainTypeSize,
    /// World-space y at which the cell's cube starts.
    pub height: f32,
}

impl Cell {
    /// Creates a cell of the given material with its cube starting at `height`.
    pub fn new(terrain_type: TerrainType, height: f32) -> Self {
        Cell {
            terrain_type: terrain_type as TerrainTypeSize,
            height,
        }
    }

    /// The cell's material as a rich enum.
    ///
    /// Cells built through `Cell::new` always hold a valid index; anything else
    /// falls back to grass.
    pub fn terrain(&self) -> TerrainType {
        TerrainType::from_index(self.terrain_type).unwrap_or(TerrainType::GRASS)
    }

    /// World-space y of the cell's top face.
    pub fn top(&self) -> f32 {
        self.height + 1.0
    }
}
