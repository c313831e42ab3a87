//! # Unit Module
//!
//! A movable body that walks, jumps and falls on the terrain.
//!
//! ## Movement Model
//!
//! Movement is driven by a `direction` vector. Horizontal intent is accumulated
//! between updates with `push_direction` and cleared after each update, so it
//! behaves like held keys sampled once per frame. The vertical component is
//! persistent: gravity adds to a growing fall velocity while the unit is
//! airborne, capped at `TERMINAL_VELOCITY`, and a jump sets it to a fixed
//! upward velocity.
//!
//! ## Collision Resolution
//!
//! Each update resolves the horizontal and vertical parts of the move
//! separately against the world:
//!
//! 1. The horizontal move is applied only if the moved box is clear
//! 2. A blocked downward move lands the unit; a blocked upward move ends the ascent
//! 3. A grounded unit checks just below its feet and starts falling if nothing is there
//!
//! Boxes are tested with `World::test_collision`, so a unit should stay under
//! one cell across and move less than a cell per update.

use cgmath::{Point3, Vector3};
use log::{debug, trace};

use crate::error::WorldError;
use crate::voxels::collision::Aabb;
use crate::voxels::world::World;

/// Added to the fall velocity on every airborne update.
pub const GRAVITY: f32 = 0.014;
/// Fastest descent per update.
///
/// Kept below one cell so a falling box can never step over a terrain cube
/// between two collision tests.
pub const TERMINAL_VELOCITY: f32 = 0.9;
/// Vertical velocity given by a jump.
pub const JUMP_VELOCITY: f32 = 0.8;
/// Horizontal distance covered per update for one unit of intent.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 0.3;
/// Multiplier applied to horizontal movement while sprinting.
pub const DEFAULT_SPRINT_FACTOR: f32 = 2.0;
/// Distance below the feet checked for supporting terrain.
const SUPPORT_GAP: f32 = 0.05;

/// What happened during a single `Unit::update`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitStep {
    /// Displacement actually applied.
    pub moved: Vector3<f32>,
    /// The horizontal move was discarded because it hit terrain.
    pub blocked_horizontal: bool,
    /// The unit touched down this update.
    pub landed: bool,
    /// The unit lost its support this update.
    pub started_falling: bool,
}

/// A player-controlled body in world space.
#[derive(Clone, Debug)]
pub struct Unit {
    /// Position of the centre of the unit's feet
    pub position: Point3<f32>,
    /// Pending movement; `x`/`z` are per-update intent, `y` is vertical velocity
    pub direction: Vector3<f32>,
    /// Horizontal distance per update for one unit of intent
    pub movement_speed: f32,
    /// Horizontal multiplier while sprinting
    pub sprint_factor: f32,
    /// Whether `sprint_factor` applies
    pub sprinting: bool,
    /// Whether the unit is airborne and subject to gravity
    pub falling: bool,
    /// Current downward speed gained from gravity
    pub fall_velocity: f32,
    /// Half the unit's width, height and depth
    pub half_extents: Vector3<f32>,
}

impl Unit {
    /// Creates a grounded, motionless unit with default speed and a
    /// half-cell wide, one-cell tall body.
    ///
    /// # Arguments
    /// * `position` - Where the unit's feet are placed
    ///
    /// If nothing is under the unit, it starts falling on the first update.
    pub fn new<P: Into<Point3<f32>>>(position: P) -> Self {
        Unit {
            position: position.into(),
            direction: Vector3::new(0.0, 0.0, 0.0),
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            sprint_factor: DEFAULT_SPRINT_FACTOR,
            sprinting: false,
            falling: false,
            fall_velocity: 0.0,
            half_extents: Vector3::new(0.25, 0.5, 0.25),
        }
    }

    /// Adds horizontal intent for the next update, scaled by `movement_speed`.
    pub fn push_direction(&mut self, dx: f32, dz: f32) {
        self.direction.x += dx * self.movement_speed;
        self.direction.z += dz * self.movement_speed;
    }

    /// Turns sprinting on or off for following updates.
    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = sprinting;
    }

    /// Starts a jump. Ignored while airborne.
    pub fn jump(&mut self) {
        if !self.falling {
            self.falling = true;
            self.direction.y = JUMP_VELOCITY;
        }
    }

    /// Cancels all vertical motion and marks the unit as grounded.
    pub fn stop(&mut self) {
        self.falling = false;
        self.direction.y = 0.0;
        self.fall_velocity = 0.0;
    }

    /// The unit's box in world space, standing on `position`.
    pub fn bounding_box(&self) -> Aabb {
        let h = self.half_extents;
        Aabb::new(
            self.position + Vector3::new(-h.x, 0.0, -h.z),
            self.position + Vector3::new(h.x, 2.0 * h.y, h.z),
        )
    }

    /// Horizontal displacement requested for this update.
    fn horizontal_move(&self) -> Vector3<f32> {
        let factor = if self.sprinting { self.sprint_factor } else { 1.0 };
        Vector3::new(self.direction.x * factor, 0.0, self.direction.z * factor)
    }

    /// Advances the unit by one update, resolving its move against the terrain.
    ///
    /// # Returns
    /// A `UnitStep` describing the applied move and any contact events.
    ///
    /// # Errors
    /// `WorldError::InvalidPosition` if the unit's box cannot be mapped onto
    /// the world grid.
    pub fn update(&mut self, world: &mut World) -> Result<UnitStep, WorldError> {
        if self.falling {
            self.fall_velocity = (self.fall_velocity + GRAVITY).min(TERMINAL_VELOCITY);
            self.direction.y = (self.direction.y - self.fall_velocity).max(-TERMINAL_VELOCITY);
        }

        let start = self.position;
        let mut step = UnitStep {
            moved: Vector3::new(0.0, 0.0, 0.0),
            blocked_horizontal: false,
            landed: false,
            started_falling: false,
        };

        let horizontal = self.horizontal_move();
        if horizontal.x != 0.0 || horizontal.z != 0.0 {
            if world.test_collision(&self.bounding_box().translated(horizontal))? {
                trace!("Horizontal move {horizontal:?} blocked at {:?}", self.position);
                step.blocked_horizontal = true;
            } else {
                self.position += horizontal;
            }
        }

        let vertical = Vector3::new(0.0, self.direction.y, 0.0);
        if vertical.y != 0.0 {
            if world.test_collision(&self.bounding_box().translated(vertical))? {
                if vertical.y < 0.0 {
                    debug!("Unit landed at {:?}", self.position);
                    self.stop();
                    step.landed = true;
                } else {
                    // Head hit terrain; gravity takes over from here.
                    self.direction.y = 0.0;
                    self.fall_velocity = 0.0;
                }
            } else {
                self.position += vertical;
            }
        }

        self.direction.x = 0.0;
        self.direction.z = 0.0;

        if !self.falling {
            let below = self
                .bounding_box()
                .translated(Vector3::new(0.0, -SUPPORT_GAP, 0.0));
            if !world.test_collision(&below)? {
                trace!("Unit lost support at {:?}", self.position);
                self.falling = true;
                step.started_falling = true;
            }
        }

        step.moved = self.position - start;
        Ok(step)
    }
}
