#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A procedurally generated, chunked voxel terrain with lazy generation and
//! box collision queries.
//!
//! The world is an infinite heightfield split into square chunks. Chunks are
//! generated from seeded fractal noise the first time anything touches them
//! and cached afterwards, so the terrain grows around whatever is queried.
//!
//! ## Key Modules
//!
//! * `voxels` - Cells, chunks, generation, storage, coordinates and collision
//! * `unit` - A body that walks, jumps and falls on the terrain
//! * `config` - JSON-loadable world parameters
//! * `error` - The crate's error type
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::{Unit, World};
//!
//! let mut world = World::with_seed(55, 1.0).unwrap();
//! let mut unit = Unit::new(Point3::new(0.5, 40.0, 0.5));
//!
//! for _ in 0..600 {
//!     unit.update(&mut world).unwrap();
//! }
//! assert!(!unit.falling);
//! ```
//!
//! ## Performance Considerations
//!
//! * Generation is synchronous; the first query near unexplored terrain pays
//!   for up to four chunks (collision) or the whole view (rendering)
//! * Chunk lookup is a hash map access
//! * `WorldConfig::max_chunks` bounds memory by evicting least-recently-used chunks

use cgmath::Point3;
use log::info;

pub mod config;
pub mod error;
pub mod unit;
pub mod voxels;

pub use config::{FbmConfig, WorldConfig};
pub use error::WorldError;
pub use unit::{Unit, UnitStep};
pub use voxels::cell::{terrain_type::TerrainType, Cell};
pub use voxels::chunk::{Chunk, CHUNK_SIZE};
pub use voxels::collision::Aabb;
pub use voxels::coords::{CellCoord, ChunkCoord, LocalCell};
pub use voxels::world::{World, WorldInfo};

/// Number of updates the demo walk runs for.
pub const DEMO_STEPS: usize = 600;
/// Height above the terrain the demo unit is dropped from.
const DEMO_SPAWN_HEIGHT: f32 = 10.0;

/// Runs the headless demo: builds a world, drops a unit onto it and lets it
/// wander, logging world statistics along the way.
///
/// The first command line argument, if present, is the path of a JSON
/// `WorldConfig`. Set `RUST_LOG` to control log output.
pub fn run() -> Result<(), WorldError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {path}");
            WorldConfig::from_file(path)?
        }
        None => WorldConfig::default(),
    };

    let mut rng = fastrand::Rng::with_seed(config.seed as u64);
    let mut world = World::new(config)?;

    let spawn = Point3::new(0.5, 0.0, 0.5);
    let ground = world.surface_height_at(spawn)?;
    let mut unit = Unit::new(Point3::new(spawn.x, ground + DEMO_SPAWN_HEIGHT, spawn.z));

    for step in 0..DEMO_STEPS {
        unit.push_direction(rng.f32() * 2.0 - 1.0, rng.f32() * 2.0 - 1.0);
        unit.set_sprinting(rng.u8(..) < 32);
        if rng.u8(..) < 8 {
            unit.jump();
        }

        let outcome = unit.update(&mut world)?;
        if outcome.landed {
            info!("Unit landed at {:?}", unit.position);
        }

        let visible = world.chunks_around(unit.position)?.len();
        if step % 100 == 0 {
            info!("Step {step}: {visible} chunks in view, {}", world.info());
        }
    }

    let summary = world.info();
    info!("{summary}");
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}
