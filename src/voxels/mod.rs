//! # Voxel World Core
//!
//! This module contains the terrain model: how it is generated, stored,
//! addressed and queried.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Cell**: A single terrain column with a terrain type and a height
//! * **Chunk**: A fixed-size square grid of cells, generated as a unit
//! * **Noise Generator**: Seeded fractal noise that drives terrain shape
//! * **Chunk Store**: Sparse, optionally bounded cache of generated chunks
//! * **Coords**: Conversions between world, cell and chunk space
//! * **Collision**: Bounding boxes and the terrain overlap query
//! * **World**: Owns all of the above behind a single interface
//!
//! ## Data Flow
//!
//! 1. A caller asks the world about a position (collision, cell lookup, view)
//! 2. The position is mapped to the chunks it touches
//! 3. Missing chunks are generated from noise and stored
//! 4. The query is answered from stored cells
//!
//! ## Thread Safety
//!
//! Lookups that may generate take `&mut World`, so the world is single-owner.
//! Chunks and generators are plain data and can be cloned across threads.

pub mod cell;
pub mod chunk;
pub mod chunk_store;
pub mod collision;
pub mod coords;
pub mod noise_generator;
pub mod world;
