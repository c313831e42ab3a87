//! # Collision Module
//!
//! Axis-aligned bounding boxes and the terrain collision query.
//!
//! Terrain collision is resolved against the 3x3 block of cells centred on the
//! cell under a box's minimum corner. Each cell contributes a unit cube whose
//! bottom sits at the cell's height. This is a narrow-phase only check: a box
//! wider than one cell, or one that moves more than a cell per query, can pass
//! through terrain outside the sampled neighbourhood.

use cgmath::{Point3, Vector3};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

use super::cell::Cell;
use super::chunk_store::ChunkStore;
use super::coords::{to_cube_coord, validate_position, CellCoord};

/// Offsets of the sampled neighbourhood, scanned `z` outer, `x` inner.
const NEIGHBOURHOOD: [i64; 3] = [-1, 0, 1];

/// An axis-aligned box in world space.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lowest corner; no axis exceeds `max`.
    pub min: [f32; 3],
    /// Highest corner.
    pub max: [f32; 3],
}

impl Aabb {
    /// Creates a box from two corners; each axis is ordered so `min <= max`.
    pub fn new(a: Point3<f32>, b: Point3<f32>) -> Self {
        Aabb {
            min: [a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)],
            max: [a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)],
        }
    }

    /// Creates a box extending `half_extents` from `center` on each axis.
    pub fn from_center_half_extents(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        Aabb::new(center - half_extents, center + half_extents)
    }

    /// The unit cube a terrain cell occupies.
    pub fn for_cell(cell: CellCoord, terrain: &Cell) -> Self {
        let x = cell.x as f32;
        let z = cell.z as f32;
        Aabb {
            min: [x, terrain.height, z],
            max: [x + 1.0, terrain.top(), z + 1.0],
        }
    }

    /// The lowest corner as a point.
    pub fn min_point(&self) -> Point3<f32> {
        Point3::from(self.min)
    }

    /// The highest corner as a point.
    pub fn max_point(&self) -> Point3<f32> {
        Point3::from(self.max)
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        )
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f32> {
        self.max_point() - self.min_point()
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Aabb {
            min: (self.min_point() + offset).into(),
            max: (self.max_point() + offset).into(),
        }
    }

    /// Whether every corner component is finite.
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|v| v.is_finite())
    }

    /// Interval overlap on all three axes. Touching faces count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| self.max[axis] >= other.min[axis] && self.min[axis] <= other.max[axis])
    }
}

/// Iterates the neighbourhood cells around the cell under `aabb.min`.
fn neighbourhood(aabb: &Aabb) -> Result<impl Iterator<Item = CellCoord>, WorldError> {
    if !aabb.is_finite() {
        validate_position(aabb.max_point())?;
    }
    let center = to_cube_coord(aabb.min_point())?;
    Ok(NEIGHBOURHOOD
        .into_iter()
        .flat_map(move |dz| NEIGHBOURHOOD.into_iter().map(move |dx| center.offset(dx, dz))))
}

/// Tests a box against the terrain around its minimum corner.
///
/// Chunks touched by the neighbourhood are generated if absent.
///
/// # Returns
/// `true` as soon as one neighbourhood cell overlaps the box.
///
/// # Errors
/// `WorldError::InvalidPosition` if the box has non-finite or out-of-range corners.
pub fn test_collision(store: &mut ChunkStore, aabb: &Aabb) -> Result<bool, WorldError> {
    for cell in neighbourhood(aabb)? {
        let terrain = store.get_or_generate_cell(cell);
        let cell_box = Aabb::for_cell(cell, &terrain);
        trace!(
            "Testing {:?} against cell ({}, {}) at height {}",
            aabb.min,
            cell.x,
            cell.z,
            terrain.height
        );
        if aabb.overlaps(&cell_box) {
            debug!(
                "Collision: {:?} against cell ({}, {}) at height {}",
                aabb.min, cell.x, cell.z, terrain.height
            );
            return Ok(true);
        }
    }
    Ok(false)
}

/// The cube boxes of the nine cells `test_collision` samples, in scan order.
///
/// Intended for debug drawing; generates chunks like `test_collision` does.
pub fn nearest_cell_boxes(store: &mut ChunkStore, aabb: &Aabb) -> Result<Vec<Aabb>, WorldError> {
    Ok(neighbourhood(aabb)?
        .map(|cell| Aabb::for_cell(cell, &store.get_or_generate_cell(cell)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::voxels::cell::{terrain_type::TerrainType, MAX_ELEVATION};
    use crate::voxels::chunk::chunk_generation::ChunkGenerator;
    use crate::voxels::coords::{ChunkCoord, WORLD_COORDINATE_LIMIT};

    fn store() -> ChunkStore {
        ChunkStore::new(
            ChunkGenerator::from_config(&WorldConfig::with_seed(55, 1.0)),
            None,
        )
    }

    fn unit_box_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Point3::new(x, y, z), Point3::new(x + 0.5, y + 0.5, z + 0.5))
    }

    #[test]
    fn test_overlap_rules() {
        let a = unit_box_at(0.0, 0.0, 0.0);
        assert!(a.overlaps(&unit_box_at(0.25, 0.25, 0.25)));
        // Touching faces overlap.
        assert!(a.overlaps(&unit_box_at(0.5, 0.0, 0.0)));
        // Separated on a single axis is enough to miss.
        assert!(!a.overlaps(&unit_box_at(0.0, 0.6, 0.0)));
        assert!(!a.overlaps(&unit_box_at(0.0, 0.0, -0.6)));
    }

    #[test]
    fn test_new_orders_corners() {
        let b = Aabb::new(Point3::new(1.0, -1.0, 3.0), Point3::new(-1.0, 2.0, 0.0));
        assert_eq!(b.min, [-1.0, -1.0, 0.0]);
        assert_eq!(b.max, [1.0, 2.0, 3.0]);
        assert_eq!(b.center(), Point3::new(0.0, 0.5, 1.5));
        assert_eq!(b.size(), Vector3::new(2.0, 3.0, 3.0));
    }

    #[test]
    fn test_cell_box_spans_one_unit_from_height() {
        let cell = Cell::new(TerrainType::DIRT, 2.5);
        let b = Aabb::for_cell(CellCoord::new(-3, 4), &cell);
        assert_eq!(b.min, [-3.0, 2.5, 4.0]);
        assert_eq!(b.max, [-2.0, 3.5, 5.0]);
    }

    #[test]
    fn test_box_far_above_terrain_does_not_collide() {
        let mut store = store();
        let aabb = unit_box_at(0.0, 100.0, 0.0);
        assert!(!test_collision(&mut store, &aabb).unwrap());
    }

    #[test]
    fn test_box_inside_terrain_collides() {
        let mut store = store();
        let cell = CellCoord::new(5, -7);
        let terrain = store.get_or_generate_cell(cell);
        let aabb = unit_box_at(5.2, terrain.height - 0.25, -6.8);
        assert!(test_collision(&mut store, &aabb).unwrap());
    }

    #[test]
    fn test_box_just_above_every_sampled_cell_is_clear() {
        let mut store = store();
        let query = unit_box_at(17.3, 0.0, -40.6);
        let boxes = nearest_cell_boxes(&mut store, &query).unwrap();
        let highest_top = boxes.iter().map(|b| b.max[1]).fold(f32::MIN, f32::max);
        let above = query.translated(Vector3::new(0.0, highest_top + 0.01, 0.0));
        assert!(!test_collision(&mut store, &above).unwrap());
    }

    #[test]
    fn test_collision_generates_missing_chunks() {
        let mut store = store();
        // The corner cell of chunk (0, 0) samples four chunks.
        let aabb = unit_box_at(0.1, MAX_ELEVATION * 10.0, 0.1);
        test_collision(&mut store, &aabb).unwrap();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_nearest_boxes_scan_order() {
        let mut store = store();
        let boxes = nearest_cell_boxes(&mut store, &unit_box_at(10.5, 0.0, 20.5)).unwrap();
        assert_eq!(boxes.len(), 9);
        assert_eq!([boxes[0].min[0], boxes[0].min[2]], [9.0, 19.0]);
        assert_eq!([boxes[1].min[0], boxes[1].min[2]], [10.0, 19.0]);
        assert_eq!([boxes[4].min[0], boxes[4].min[2]], [10.0, 20.0]);
        assert_eq!([boxes[8].min[0], boxes[8].min[2]], [11.0, 21.0]);
        for b in &boxes {
            let size = b.size();
            assert_eq!((size.x, size.z), (1.0, 1.0));
            assert!((size.y - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rejects_non_finite_box() {
        let mut store = store();
        let aabb = Aabb {
            min: [f32::NAN, 0.0, 0.0],
            max: [1.0, 1.0, 1.0],
        };
        let err = test_collision(&mut store, &aabb).unwrap_err();
        assert!(matches!(err, WorldError::InvalidPosition { .. }));
        let aabb = Aabb {
            min: [0.0, 0.0, 0.0],
            max: [1.0, f32::INFINITY, 1.0],
        };
        assert!(nearest_cell_boxes(&mut store, &aabb).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_query_at_coordinate_limit() {
        let mut store = store();
        let x = WORLD_COORDINATE_LIMIT - 0.5;
        let high = Aabb::new(Point3::new(x, 100.0, 0.5), Point3::new(x + 0.3, 101.0, 0.8));
        assert!(!test_collision(&mut store, &high).unwrap());

        let boxes = nearest_cell_boxes(&mut store, &high).unwrap();
        assert_eq!(boxes.len(), 9);
        let limit_cell = to_cube_coord(high.min_point()).unwrap();
        assert_eq!(limit_cell.chunk(), ChunkCoord::new(31_250_000, 0));

        let terrain = store.get_or_generate_cell(limit_cell);
        let sunk = Aabb::new(
            Point3::new(x, terrain.height + 0.2, 0.5),
            Point3::new(x + 0.3, terrain.height + 0.6, 0.8),
        );
        assert!(test_collision(&mut store, &sunk).unwrap());
    }
}
