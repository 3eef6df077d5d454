//! Core data structures for the game
//! Contains fundamental types like blocks, faces, and errors.

pub mod block;
pub mod error;
pub mod face;

// Re-export commonly used types
pub use block::{Appearance, BlockType};
pub use error::{VoxelError, VoxelResult};
pub use face::{Face, VoxelCoord};
