//! # Coordinate Mapping
//!
//! Conversions between the three spaces the world is addressed in:
//!
//! * **World space**: continuous `Point3<f32>` positions used by units and cameras
//! * **Cell space**: the integer column `(floor(x), floor(z))` a position falls into
//! * **Chunk space**: the integer chunk grid, one unit per `CHUNK_SIZE` cells
//!
//! A cell is further split into the chunk that owns it and its local index
//! inside that chunk. All conversions use floor semantics, so negative
//! coordinates land in the chunk to their "left" and local indices are
//! always within `[0, CHUNK_SIZE)`.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

use super::chunk::CHUNK_SIZE;

/// Largest absolute world coordinate accepted on x and z.
///
/// Keeps the float-to-cell conversion exact enough to be meaningful and every
/// resulting chunk index well inside `i32`.
pub const WORLD_COORDINATE_LIMIT: f32 = 1.0e9;

/// Position of a chunk in the chunk grid.
///
/// Every `i32` pair is a valid chunk; its cells are addressed with `i64`
/// cell coordinates, which cover the whole grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk index along the world x axis.
    pub x: i32,
    /// Chunk index along the world z axis.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk displaced by `(dx, dz)` chunks, saturating at the grid edge.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        ChunkCoord::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }

    /// Chebyshev distance in chunks, used to rank chunks by proximity.
    pub fn distance(self, other: ChunkCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }
}

/// Integer world-cell column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    /// Cell index along the world x axis.
    pub x: i64,
    /// Cell index along the world z axis.
    pub z: i64,
}

impl CellCoord {
    /// Creates a cell coordinate.
    pub const fn new(x: i64, z: i64) -> Self {
        CellCoord { x, z }
    }

    /// The cell displaced by `(dx, dz)` cells.
    pub fn offset(self, dx: i64, dz: i64) -> Self {
        CellCoord::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }

    /// The chunk that owns this cell.
    ///
    /// Cells beyond the last `i32` chunk on either axis belong to that edge chunk.
    pub fn chunk(self) -> ChunkCoord {
        let chunk_index = |v: i64| {
            v.div_euclid(CHUNK_SIZE as i64)
                .clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        ChunkCoord::new(chunk_index(self.x), chunk_index(self.z))
    }

    /// Index of this cell inside its owning chunk.
    pub fn local(self) -> LocalCell {
        LocalCell {
            x: self.x.rem_euclid(CHUNK_SIZE as i64) as usize,
            z: self.z.rem_euclid(CHUNK_SIZE as i64) as usize,
        }
    }
}

/// Index of a cell within its chunk; both axes are in `[0, CHUNK_SIZE)`.
///
/// The range is enforced on construction, so indexing a chunk with a
/// `LocalCell` never goes out of bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalCell {
    x: usize,
    z: usize,
}

impl LocalCell {
    /// Creates a local index, or `None` if either axis is not below `CHUNK_SIZE`.
    pub fn new(x: usize, z: usize) -> Option<Self> {
        let size = CHUNK_SIZE as usize;
        (x < size && z < size).then_some(LocalCell { x, z })
    }

    /// Column within the chunk.
    pub fn x(self) -> usize {
        self.x
    }

    /// Row within the chunk.
    pub fn z(self) -> usize {
        self.z
    }
}

/// Rejects positions that cannot be mapped onto the cell grid.
pub fn validate_position(pos: Point3<f32>) -> Result<Point3<f32>, WorldError> {
    let addressable = |v: f32| v.is_finite() && v.abs() <= WORLD_COORDINATE_LIMIT;
    if addressable(pos.x) && addressable(pos.z) && pos.y.is_finite() {
        Ok(pos)
    } else {
        Err(WorldError::InvalidPosition {
            x: pos.x,
            y: pos.y,
            z: pos.z,
        })
    }
}

/// The integer cell column a world position falls into.
pub fn to_cube_coord(pos: Point3<f32>) -> Result<CellCoord, WorldError> {
    let pos = validate_position(pos)?;
    Ok(CellCoord::new(pos.x.floor() as i64, pos.z.floor() as i64))
}

/// The chunk a world position falls into.
///
/// An exact multiple of `CHUNK_SIZE` belongs to the chunk starting there.
pub fn to_chunk_coord(pos: Point3<f32>) -> Result<ChunkCoord, WorldError> {
    Ok(to_cube_coord(pos)?.chunk())
}

/// The local cell index of a world position inside its owning chunk.
pub fn local_cell_from_world(pos: Point3<f32>) -> Result<LocalCell, WorldError> {
    Ok(to_cube_coord(pos)?.local())
}

/// The world cell at local index `(0, 0)` of a chunk.
pub fn chunk_origin(coord: ChunkCoord) -> CellCoord {
    let size = CHUNK_SIZE as i64;
    CellCoord::new(coord.x as i64 * size, coord.z as i64 * size)
}

/// Reassembles a world cell from its chunk and local index.
pub fn cell_from_parts(chunk: ChunkCoord, local: LocalCell) -> CellCoord {
    chunk_origin(chunk).offset(local.x as i64, local.z as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, z: f32) -> Point3<f32> {
        Point3::new(x, 0.0, z)
    }

    fn local(x: usize, z: usize) -> LocalCell {
        LocalCell::new(x, z).expect("in range")
    }

    #[test]
    fn test_chunk_coord_uses_floor_division() {
        let size = CHUNK_SIZE as f32;
        let cases = [
            (-1.0, -1),
            (-0.5, -1),
            (0.0, 0),
            (0.5, 0),
            (size - 0.5, 0),
            (size, 1),
            (size + 0.5, 1),
        ];
        for (x, expected) in cases {
            let coord = to_chunk_coord(at(x, x)).unwrap();
            assert_eq!(coord.x, expected, "x = {x}");
            assert_eq!(coord.z, expected, "z = {x}");
        }
    }

    #[test]
    fn test_negative_chunk_boundary_stays_in_its_chunk() {
        // -32 starts chunk -1; a truncate-and-subtract mapping would give -2.
        let coord = to_chunk_coord(at(-(CHUNK_SIZE as f32), 0.0)).unwrap();
        assert_eq!(coord, ChunkCoord::new(-1, 0));
        let coord = to_chunk_coord(at(-(CHUNK_SIZE as f32) - 0.25, 0.0)).unwrap();
        assert_eq!(coord, ChunkCoord::new(-2, 0));
    }

    #[test]
    fn test_local_cell_wraps_negative_coordinates() {
        assert_eq!(local_cell_from_world(at(-1.0, -0.5)).unwrap(), local(CHUNK_SIZE as usize - 1, CHUNK_SIZE as usize - 1));
        assert_eq!(
            local_cell_from_world(at(-(CHUNK_SIZE as f32), 0.0)).unwrap(),
            local(0, 0)
        );
        assert_eq!(
            local_cell_from_world(at(-33.0, 65.9)).unwrap(),
            local(31, 1)
        );
    }

    #[test]
    fn test_local_cell_range_and_round_trip() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..2000 {
            let x = (rng.f32() - 0.5) * 20_000.0;
            let z = (rng.f32() - 0.5) * 20_000.0;
            let pos = at(x, z);
            let local = local_cell_from_world(pos).unwrap();
            assert!(local.x() < CHUNK_SIZE as usize && local.z() < CHUNK_SIZE as usize);

            let chunk = to_chunk_coord(pos).unwrap();
            let cell = cell_from_parts(chunk, local);
            assert_eq!(cell.x, x.floor() as i64, "x = {x}");
            assert_eq!(cell.z, z.floor() as i64, "z = {z}");
        }
    }

    #[test]
    fn test_cube_coord_ignores_height() {
        let a = to_cube_coord(Point3::new(3.7, -50.0, -2.2)).unwrap();
        let b = to_cube_coord(Point3::new(3.1, 900.0, -2.9)).unwrap();
        assert_eq!(a, CellCoord::new(3, -3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_non_finite_positions() {
        for pos in [
            Point3::new(f32::NAN, 0.0, 0.0),
            Point3::new(0.0, f32::INFINITY, 0.0),
            Point3::new(0.0, 0.0, f32::NEG_INFINITY),
            Point3::new(2.0e9, 0.0, 0.0),
        ] {
            let err = to_chunk_coord(pos).unwrap_err();
            assert!(matches!(err, WorldError::InvalidPosition { .. }));
        }
    }

    #[test]
    fn test_chunk_distance() {
        let origin = ChunkCoord::new(0, 0);
        assert_eq!(origin.distance(ChunkCoord::new(-2, 1)), 2);
        assert_eq!(origin.offset(1, 1).distance(origin), 1);
    }

    #[test]
    fn test_local_cell_rejects_out_of_range() {
        let size = CHUNK_SIZE as usize;
        assert!(LocalCell::new(size - 1, 0).is_some());
        assert!(LocalCell::new(size, 0).is_none());
        assert!(LocalCell::new(0, usize::MAX).is_none());
    }

    #[test]
    fn test_extreme_chunks_have_exact_origins() {
        let corner = ChunkCoord::new(i32::MAX, i32::MIN);
        let origin = chunk_origin(corner);
        assert_eq!(origin.x, i32::MAX as i64 * CHUNK_SIZE as i64);
        assert_eq!(origin.z, i32::MIN as i64 * CHUNK_SIZE as i64);
        assert_eq!(origin.chunk(), corner);

        let last = cell_from_parts(corner, local(CHUNK_SIZE as usize - 1, 0));
        assert_eq!(last.chunk(), corner);
        assert_eq!(last.local(), local(CHUNK_SIZE as usize - 1, 0));
        // One cell past the grid edge still maps to the edge chunk.
        assert_eq!(last.offset(1, -1).chunk(), corner);
    }

    #[test]
    fn test_positions_at_the_coordinate_limit() {
        for x in [WORLD_COORDINATE_LIMIT, -WORLD_COORDINATE_LIMIT] {
            let pos = at(x, x);
            let chunk = to_chunk_coord(pos).unwrap();
            let cell = cell_from_parts(chunk, local_cell_from_world(pos).unwrap());
            assert_eq!(cell.x, x as i64);
            assert_eq!(cell.z, x as i64);
        }
    }

    #[test]
    fn test_distance_and_offset_at_grid_edges() {
        let min = ChunkCoord::new(i32::MIN, i32::MIN);
        let max = ChunkCoord::new(i32::MAX, i32::MAX);
        assert_eq!(min.distance(max), u32::MAX);
        assert_eq!(max.offset(1, 1), max);
        assert_eq!(min.offset(-1, 0), min);
    }
}
