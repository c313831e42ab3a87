//! # Error Module
//!
//! Defines `WorldError`, the single error type returned by the world API.
//!
//! Lookup misses are never errors: an absent chunk is generated on demand.
//! The variants here cover the conditions a caller can actually act on:
//! bad input positions, double insertion into the chunk store, and
//! configuration problems.

use std::fmt;

use crate::voxels::coords::ChunkCoord;

/// Errors that can occur while configuring or querying a voxel world.
#[derive(Debug)]
pub enum WorldError {
    /// A world position was NaN, infinite, or too large to address a cell.
    InvalidPosition {
        /// Rejected x coordinate.
        x: f32,
        /// Rejected y coordinate.
        y: f32,
        /// Rejected z coordinate.
        z: f32,
    },
    /// A chunk was inserted at a coordinate the store already holds.
    DuplicateChunk(ChunkCoord),
    /// A configuration value is out of its valid range.
    InvalidConfig(String),
    /// Reading a configuration file failed.
    Io(std::io::Error),
    /// A configuration file was not valid JSON for `WorldConfig`.
    Json(serde_json::Error),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::InvalidPosition { x, y, z } => {
                write!(f, "Invalid world position: ({x}, {y}, {z})")
            }
            WorldError::DuplicateChunk(coord) => {
                write!(f, "Chunk ({}, {}) is already stored", coord.x, coord.z)
            }
            WorldError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            WorldError::Io(e) => write!(f, "I/O error: {e}"),
            WorldError::Json(e) => write!(f, "Configuration parse error: {e}"),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Io(e) => Some(e),
            WorldError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WorldError {
    fn from(e: std::io::Error) -> Self {
        WorldError::Io(e)
    }
}

impl From<serde_json::Error> for WorldError {
    fn from(e: serde_json::Error) -> Self {
        WorldError::Json(e)
    }
}
