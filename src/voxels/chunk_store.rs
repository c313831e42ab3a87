//! # Chunk Store
//!
//! Sparse storage for generated chunks, keyed by chunk coordinate.
//!
//! The store owns every chunk it holds and hands out borrows only. It backs
//! the world's get-or-generate semantics: a miss runs the generator and keeps
//! the result, so each coordinate is generated at most once while cached.
//!
//! ## Capacity
//!
//! By default the store is unbounded and keeps every chunk for the session.
//! With a capacity, the least-recently-used chunk is evicted before a new one
//! is inserted. Generation is deterministic, so an evicted chunk comes back
//! identical the next time it is requested.

use std::num::NonZeroUsize;

use log::{debug, info};
use lru::LruCache;

use crate::error::WorldError;

use super::cell::Cell;
use super::chunk::{chunk_generation::ChunkGenerator, Chunk};
use super::coords::{CellCoord, ChunkCoord};

/// Owns generated chunks and the generator that produces them.
pub struct ChunkStore {
    chunks: LruCache<ChunkCoord, Chunk>,
    generator: ChunkGenerator,
    /// `None` when unbounded.
    capacity: Option<NonZeroUsize>,
    generated_total: u64,
    evicted_total: u64,
}

impl ChunkStore {
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `generator` - Produces chunks on a miss
    /// * `capacity` - Maximum number of cached chunks, `None` for no limit
    pub fn new(generator: ChunkGenerator, capacity: Option<usize>) -> Self {
        let capacity = capacity.and_then(NonZeroUsize::new);
        let chunks = match capacity {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        ChunkStore {
            chunks,
            generator,
            capacity,
            generated_total: 0,
            evicted_total: 0,
        }
    }

    /// Returns the chunk at `coord`, generating and storing it first if absent.
    ///
    /// Marks the chunk as most recently used.
    pub fn get_or_generate(&mut self, coord: ChunkCoord) -> &Chunk {
        if !self.chunks.contains(&coord) {
            self.make_room();
            self.generated_total += 1;
            info!(
                "Adding chunk ({}, {}), {} cached",
                coord.x,
                coord.z,
                self.chunks.len() + 1
            );
        }

        let generator = &self.generator;
        self.chunks.get_or_insert(coord, || generator.generate(coord))
    }

    /// Returns the cell at a world cell coordinate, generating its chunk if needed.
    pub fn get_or_generate_cell(&mut self, cell: CellCoord) -> Cell {
        *self.get_or_generate(cell.chunk()).cell(cell.local())
    }

    /// Non-generating lookup. Does not affect eviction order.
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.peek(&coord)
    }

    /// Stores a chunk under its own coordinate.
    ///
    /// # Errors
    /// `WorldError::DuplicateChunk` if a chunk with the same coordinate is
    /// already stored; the stored chunk is left untouched.
    pub fn insert(&mut self, chunk: Chunk) -> Result<(), WorldError> {
        let coord = chunk.coord();
        if self.chunks.contains(&coord) {
            return Err(WorldError::DuplicateChunk(coord));
        }
        self.make_room();
        debug!("Inserting chunk ({}, {})", coord.x, coord.z);
        self.chunks.put(coord, chunk);
        Ok(())
    }

    /// Whether a chunk is cached at `coord`.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains(&coord)
    }

    /// Number of cached chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk is cached.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Maximum number of cached chunks, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity.map(NonZeroUsize::get)
    }

    /// Chunks generated over the store's lifetime, including regenerations.
    pub fn generated_total(&self) -> u64 {
        self.generated_total
    }

    /// Chunks dropped to honour the capacity.
    pub fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    /// Iterates over stored chunks from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }

    /// The generator used on a miss.
    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Evicts the least-recently-used chunk if the store is full.
    fn make_room(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.chunks.len() >= capacity.get() {
            match self.chunks.pop_lru() {
                Some((evicted, _)) => {
                    self.evicted_total += 1;
                    debug!("Evicting chunk ({}, {})", evicted.x, evicted.z);
                }
                None => break,
            }
        }
    }
}
