use glam::IVec3;
use thiserror::Error;

/// Recoverable failures reported back to the input-handling caller.
/// A failed operation never changes world or hotbar state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoxelError {
    #[error("Cell {0} is already occupied")]
    Occupied(IVec3),
    #[error("No block at {0}")]
    NotFound(IVec3),
    #[error("Face normal {0} is not an axis-aligned unit vector")]
    InvalidNormal(IVec3),
    #[error("Cell {0} has no neighbor in that direction")]
    OutOfBounds(IVec3),
    #[error("Slot {index} out of range (hotbar has {slot_count} slots)")]
    IndexOutOfRange { index: usize, slot_count: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type VoxelResult<T> = Result<T, VoxelError>;
