//! # World Module
//!
//! This module provides the `World` struct, the single owner of all world state:
//! generation parameters, the chunk store, and the generator behind it.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks that have been
//! accessed are kept in memory. Any lookup that lands on an absent chunk
//! generates it on the spot, so the terrain expands lazily around whatever
//! positions are queried, typically the player's.
//!
//! ## Chunk Generation
//!
//! Chunks are generated from seeded fractal noise. The same seed and scale
//! always produce the same terrain, so nothing needs to be persisted between
//! runs.
//!
//! ## Performance Considerations
//!
//! - Generation runs inline on the calling thread; a jump into unexplored
//!   terrain pays for every new chunk in that call
//! - Chunk lookup is O(1) using a hash map
//! - Without `max_chunks`, every visited chunk stays cached for the session

use std::fmt;

use cgmath::Point3;
use log::info;
use serde::Serialize;

use crate::config::WorldConfig;
use crate::error::WorldError;

use super::cell::Cell;
use super::chunk::{chunk_generation::ChunkGenerator, Chunk};
use super::chunk_store::ChunkStore;
use super::collision::{self, Aabb};
use super::coords::{self, CellCoord, ChunkCoord};

/// Diagnostic snapshot of the chunk store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorldInfo {
    /// Chunks currently cached.
    pub chunk_count: usize,
    /// Chunks generated since the world was created.
    pub generated_total: u64,
    /// Chunks evicted to honour `max_chunks`.
    pub evicted_total: u64,
}

impl fmt::Display for WorldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worldinf: {} chunks", self.chunk_count)
    }
}

/// A procedurally generated, lazily expanding voxel terrain.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::{Aabb, World, WorldConfig};
///
/// let mut world = World::new(WorldConfig::with_seed(55, 1.0)).unwrap();
///
/// let player = Aabb::new(Point3::new(0.0, 100.0, 0.0), Point3::new(0.5, 101.0, 0.5));
/// assert!(!world.test_collision(&player).unwrap());
/// assert_eq!(world.info().chunk_count, 4);
/// ```
pub struct World {
    config: WorldConfig,
    store: ChunkStore,
}

impl World {
    /// Creates an empty world from a validated configuration.
    ///
    /// # Errors
    /// `WorldError::InvalidConfig` if any config value is out of range.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        info!(
            "World initialized: seed {}, scale {}, {} octaves",
            config.seed, config.scale, config.fbm.octaves
        );
        let store = ChunkStore::new(ChunkGenerator::from_config(&config), config.max_chunks);
        Ok(World { config, store })
    }

    /// Creates a world with default tuning and the given seed and scale.
    pub fn with_seed(seed: u32, scale: f32) -> Result<Self, WorldError> {
        Self::new(WorldConfig::with_seed(seed, scale))
    }

    /// The configuration this world was built from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the chunk at `coord`, generating it if it has not been seen yet.
    pub fn get_or_generate_chunk(&mut self, coord: ChunkCoord) -> &Chunk {
        self.store.get_or_generate(coord)
    }

    /// Returns the chunk at `coord` only if it is already cached.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.store.get(coord)
    }

    /// Stores an externally built chunk.
    ///
    /// # Errors
    /// `WorldError::DuplicateChunk` if the coordinate is already cached.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Result<(), WorldError> {
        self.store.insert(chunk)
    }

    /// The chunk a world position falls into.
    pub fn world_to_chunk_coord(&self, pos: Point3<f32>) -> Result<ChunkCoord, WorldError> {
        coords::to_chunk_coord(pos)
    }

    /// The integer cell column a world position falls into.
    pub fn world_to_cell_coord(&self, pos: Point3<f32>) -> Result<CellCoord, WorldError> {
        coords::to_cube_coord(pos)
    }

    /// The terrain cell under a world position.
    pub fn cell_at(&mut self, pos: Point3<f32>) -> Result<Cell, WorldError> {
        let cell = coords::to_cube_coord(pos)?;
        Ok(self.store.get_or_generate_cell(cell))
    }

    /// World-space y of the top of the terrain column under a position.
    pub fn surface_height_at(&mut self, pos: Point3<f32>) -> Result<f32, WorldError> {
        Ok(self.cell_at(pos)?.top())
    }

    /// Tests a box against the terrain around its minimum corner.
    ///
    /// See `collision::test_collision` for the neighbourhood rules.
    pub fn test_collision(&mut self, aabb: &Aabb) -> Result<bool, WorldError> {
        collision::test_collision(&mut self.store, aabb)
    }

    /// The nine terrain cubes sampled by `test_collision`, for debug drawing.
    pub fn nearby_cell_boxes(&mut self, aabb: &Aabb) -> Result<Vec<Aabb>, WorldError> {
        collision::nearest_cell_boxes(&mut self.store, aabb)
    }

    /// Ensures the chunks within `view_radius` of a position exist and returns
    /// them, nearest first.
    ///
    /// This is the set a renderer draws each frame.
    pub fn chunks_around(&mut self, pos: Point3<f32>) -> Result<Vec<&Chunk>, WorldError> {
        let center = coords::to_chunk_coord(pos)?;
        let radius = self.config.view_radius;

        let mut wanted = Vec::with_capacity(self.config.view_chunk_count());
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                wanted.push(center.offset(dx, dz));
            }
        }
        wanted.sort_by_key(|coord| center.distance(*coord));

        for coord in &wanted {
            self.store.get_or_generate(*coord);
        }

        // `max_chunks` is validated to hold the whole view, so nothing requested
        // above has been evicted yet.
        Ok(wanted
            .iter()
            .filter_map(|coord| self.store.get(*coord))
            .collect())
    }

    /// Snapshot of the store's size and history.
    pub fn info(&self) -> WorldInfo {
        WorldInfo {
            chunk_count: self.store.len(),
            generated_total: self.store.generated_total(),
            evicted_total: self.store.evicted_total(),
        }
    }
}
