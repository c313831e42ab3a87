//! # Chunk Iteration Module
//!
//! This module provides an iterator over every cell of a chunk together with
//! its world cell coordinate, in storage order (z rows, then x within a row).
//! Renderers use it to place one cube per cell; queries use it to scan terrain.

use crate::voxels::cell::Cell;
use crate::voxels::coords::{CellCoord, LocalCell};

use super::{Chunk, CHUNK_DIMENSION};

/// An iterator over all cells in a chunk, yielding world positions.
pub struct ChunkCellIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current X position within the chunk
    local_x: usize,
    /// Current Z position within the chunk
    local_z: usize,
}

impl<'a> ChunkCellIterator<'a> {
    /// Starts at local cell `(0, 0)` of `chunk_ref`.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkCellIterator {
            chunk_ref,
            local_x: 0,
            local_z: 0,
        }
    }
}

impl<'a> Iterator for ChunkCellIterator<'a> {
    type Item = (CellCoord, &'a Cell);

    fn next(&mut self) -> Option<Self::Item> {
        // Runs out once the cursor moves past the last row.
        let local = LocalCell::new(self.local_x, self.local_z)?;
        let item = (self.chunk_ref.world_cell(local), self.chunk_ref.cell(local));

        self.local_x += 1;
        if self.local_x == CHUNK_DIMENSION {
            self.local_x = 0;
            self.local_z += 1;
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (CHUNK_DIMENSION - self.local_z) * CHUNK_DIMENSION - self.local_x;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkCellIterator<'_> {}

impl Chunk {
    /// Iterates over every cell with its world cell coordinate.
    pub fn iter_cells(&self) -> ChunkCellIterator<'_> {
        ChunkCellIterator::new(self)
    }
}
