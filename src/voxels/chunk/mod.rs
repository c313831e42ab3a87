//! # Chunk Module
//!
//! This module provides the `Chunk` struct, a fixed-size square grid of terrain
//! cells, and the machinery to generate and traverse it.
//!
//! ## Layout
//!
//! Cells are stored row-major as `cells[local_z][local_x]`, matching the order in
//! which the generator fills them. A chunk at chunk coordinate `(cx, cz)` covers
//! world cells `cx * CHUNK_SIZE .. (cx + 1) * CHUNK_SIZE` on x, and likewise on z.
//!
//! ## Lifecycle
//!
//! Chunks are produced by `ChunkGenerator`, handed to the chunk store, and never
//! modified afterwards. Their coordinate is fixed at creation.

use super::cell::Cell;
use super::coords::{cell_from_parts, CellCoord, ChunkCoord, LocalCell};

pub mod chunk_generation;
pub mod chunk_iteration;

/// The width and depth of a chunk in cells.
pub const CHUNK_SIZE: i32 = 32;
/// `CHUNK_SIZE` as an index bound.
pub const CHUNK_DIMENSION: usize = CHUNK_SIZE as usize;
/// The number of cells in a chunk.
pub const CHUNK_AREA: usize = CHUNK_DIMENSION * CHUNK_DIMENSION;

/// A `CHUNK_SIZE x CHUNK_SIZE` grid of terrain cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not cell coordinates).
    coord: ChunkCoord,
    /// Row-major cell grid, indexed `[local_z][local_x]`.
    cells: Box<[[Cell; CHUNK_DIMENSION]; CHUNK_DIMENSION]>,
}

impl Chunk {
    /// Wraps a fully populated cell grid.
    pub fn new(coord: ChunkCoord, cells: Box<[[Cell; CHUNK_DIMENSION]; CHUNK_DIMENSION]>) -> Self {
        Chunk { coord, cells }
    }

    /// The chunk's position in the chunk grid.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// The whole grid, for renderers that upload a chunk at once.
    pub fn cells(&self) -> &[[Cell; CHUNK_DIMENSION]; CHUNK_DIMENSION] {
        &self.cells
    }

    /// Gets the cell at a local index.
    ///
    /// `LocalCell` is range-checked on construction, so this never fails.
    pub fn cell(&self, local: LocalCell) -> &Cell {
        &self.cells[local.z()][local.x()]
    }

    /// Gets the cell at a world cell coordinate, if this chunk owns it.
    pub fn cell_at(&self, cell: CellCoord) -> Option<&Cell> {
        let local = cell.local();
        if self.world_cell(local) != cell {
            return None;
        }
        Some(self.cell(local))
    }

    /// World cell coordinate of a local index in this chunk.
    pub fn world_cell(&self, local: LocalCell) -> CellCoord {
        cell_from_parts(self.coord, local)
    }

    /// The lowest and highest cell heights in the chunk.
    pub fn height_range(&self) -> (f32, f32) {
        self.cells
            .iter()
            .flatten()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), cell| {
                (lo.min(cell.height), hi.max(cell.height))
            })
    }
}
