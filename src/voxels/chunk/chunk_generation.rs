//! # Chunk Generation Module
//!
//! Turns a chunk coordinate into a populated heightfield.
//!
//! Each cell samples fractal noise at its world-relative position, scaled so that
//! one chunk spans `scale` units of noise space. The normalized sample picks the
//! terrain band and, damped, the cell height. Sampling in world-relative space
//! means neighbouring chunks join without seams.

use log::debug;

use crate::config::WorldConfig;
use crate::voxels::cell::{terrain_type::TerrainType, Cell, MAX_ELEVATION};
use crate::voxels::coords::{chunk_origin, ChunkCoord};
use crate::voxels::noise_generator::{normalize, NoiseGenerator};

use super::{Chunk, CHUNK_DIMENSION, CHUNK_SIZE};

/// Produces chunks from noise. Generation is a pure function of the
/// coordinate and the generator's parameters.
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    noise: NoiseGenerator,
    /// Noise-space distance covered by one chunk.
    scale: f32,
    /// Fraction of `MAX_ELEVATION` used by terrain.
    height_damping: f32,
}

impl ChunkGenerator {
    /// Creates a generator from a noise source and shaping parameters.
    ///
    /// # Arguments
    /// * `noise` - Seeded noise the terrain is sampled from
    /// * `scale` - Noise-space distance covered by one chunk
    /// * `height_damping` - Fraction of `MAX_ELEVATION` used by terrain
    pub fn new(noise: NoiseGenerator, scale: f32, height_damping: f32) -> Self {
        ChunkGenerator {
            noise,
            scale,
            height_damping,
        }
    }

    /// Builds a generator from the generation-related fields of a config.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(
            NoiseGenerator::new(config.seed, config.fbm.clone()),
            config.scale,
            config.height_damping,
        )
    }

    /// The noise source behind this generator.
    pub fn noise(&self) -> &NoiseGenerator {
        &self.noise
    }

    /// Generates the chunk at `coord`.
    ///
    /// Total over every integer coordinate; calling it twice with the same
    /// coordinate yields bit-identical chunks.
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        debug!("Generating chunk ({}, {})", coord.x, coord.z);

        let origin = chunk_origin(coord);
        let mut cells =
            Box::new([[Cell::new(TerrainType::GRASS, 0.0); CHUNK_DIMENSION]; CHUNK_DIMENSION]);
        for (local_z, row) in cells.iter_mut().enumerate() {
            for (local_x, cell) in row.iter_mut().enumerate() {
                *cell = self.sample_cell(origin.x + local_x as i64, origin.z + local_z as i64);
            }
        }

        Chunk::new(coord, cells)
    }

    /// Computes the cell at a world cell coordinate without building a chunk.
    ///
    /// Cell coordinates are `i64`, so every cell of every `i32` chunk is
    /// sampled at its true position.
    pub fn sample_cell(&self, world_x: i64, world_z: i64) -> Cell {
        let step = (self.scale / CHUNK_SIZE as f32) as f64;
        let nx = world_x as f64 * step;
        let nz = world_z as f64 * step;

        let normalized = normalize(self.noise.fbm(nx, nz)) as f32;
        let terrain_type = TerrainType::from_normalized(normalized);
        let height = normalized * MAX_ELEVATION * self.height_damping;

        Cell::new(terrain_type, height)
    }
}
